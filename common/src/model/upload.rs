//! Upload response contract and the failures an upload attempt can end in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Message shown when a failure carries no text of its own.
pub const DEFAULT_UPLOAD_ERROR: &str = "Can not upload an image, try another";

/// Why an upload attempt did not produce a photo.
///
/// The `Display` output is what the user sees in the error notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The file picker was dismissed or the chosen file was not acceptable.
    #[error("{0}")]
    Selection(String),
    /// The request could not be sent or the server answered with an error status.
    #[error("{0}")]
    Transmission(String),
    /// The server answered but without a success flag or a usable file URL.
    #[error("{0}")]
    MalformedResponse(String),
    #[error("Image upload timed out after {0} ms")]
    TimedOut(u32),
}

/// Metadata of a stored file. Keys other than `url` are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of an upload response, e.g. `{"success": 1, "file": {"url": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    #[serde(deserialize_with = "flag", serialize_with = "as_number", default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadOutcome {
    pub fn uploaded(url: impl Into<String>) -> Self {
        Self {
            success: true,
            file: Some(UploadedFile {
                url: Some(url.into()),
                extra: Map::new(),
            }),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            file: None,
            message: Some(message.into()),
        }
    }

    /// Maps an HTTP answer onto the upload contract.
    ///
    /// A non-2xx status is a [`UploadError::Transmission`] carrying the server
    /// `message` when the body has one, otherwise the status code. A 2xx body
    /// that is not an outcome is a [`UploadError::MalformedResponse`].
    pub fn from_response(status: u16, body: &str) -> Result<Self, UploadError> {
        let parsed = serde_json::from_str::<UploadOutcome>(body);

        if !(200..300).contains(&status) {
            let message = parsed
                .ok()
                .and_then(|outcome| outcome.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Upload failed with status {status}"));
            return Err(UploadError::Transmission(message));
        }

        parsed.map_err(|_| UploadError::MalformedResponse(DEFAULT_UPLOAD_ERROR.to_string()))
    }

    /// Extracts the photo URL, or explains why there is none.
    ///
    /// Anything short of a success flag plus a non-empty `file.url` is a
    /// [`UploadError::MalformedResponse`]; the server `message` is used when it
    /// sent one, otherwise [`DEFAULT_UPLOAD_ERROR`].
    pub fn into_photo_url(self) -> Result<String, UploadError> {
        let url = self
            .file
            .and_then(|file| file.url)
            .filter(|url| !url.trim().is_empty());

        match url {
            Some(url) if self.success => Ok(url),
            _ => Err(UploadError::MalformedResponse(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_UPLOAD_ERROR.to_string()),
            )),
        }
    }
}

/// Accepts `true`/`false`, `1`/`0` and `null` for the success flag.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.as_str(), "1" | "true"),
        _ => false,
    })
}

fn as_number<S>(success: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u8(u8::from(*success))
}
