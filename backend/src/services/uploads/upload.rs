use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use common::model::upload::UploadOutcome;
use futures_util::StreamExt;
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{ServerConfig, PUBLIC_UPLOADS_PATH};

#[derive(Debug, Error)]
pub enum UploadRejection {
    #[error("Missing \"{0}\" file field")]
    MissingFile(String),
    #[error("File is larger than {0} bytes")]
    TooLarge(usize),
    #[error("File is not a supported image")]
    NotAnImage,
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Could not store the file: {0}")]
    Storage(#[from] std::io::Error),
}

impl UploadRejection {
    fn status(&self) -> StatusCode {
        match self {
            UploadRejection::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            UploadRejection::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// HTTP handler wrapper that converts the upload result into an `UploadOutcome` response.
///
/// - On success: `200 OK` with the public URL of the stored file.
/// - On failure: an error status with the reason in `message`.
pub async fn process(payload: Multipart, config: web::Data<ServerConfig>) -> impl Responder {
    match store_upload(payload, &config).await {
        Ok(url) => {
            info!("Stored upload at {}", url);
            HttpResponse::Ok().json(UploadOutcome::uploaded(url))
        }
        Err(e) => {
            warn!("Rejected upload: {}", e);
            HttpResponse::build(e.status()).json(UploadOutcome::failed(e.to_string()))
        }
    }
}

/// Reads the file part of `payload`, checks it is an image and writes it to the
/// upload directory as `<md5>.<ext>`. Returns the URL it is served under.
///
/// Identical uploads map to the same file.
pub async fn store_upload(
    mut payload: Multipart,
    config: &ServerConfig,
) -> Result<String, UploadRejection> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() == Some(config.upload_field.as_str()) {
            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk?;
                if bytes.len() + chunk.len() > config.max_upload_bytes {
                    return Err(UploadRejection::TooLarge(config.max_upload_bytes));
                }
                bytes.extend_from_slice(&chunk);
            }
            image = Some(bytes);
        } else {
            // Extra request data: drained, not stored.
            let mut len = 0;
            while let Some(chunk) = field.next().await {
                len += chunk?.len();
            }
            debug!("Ignoring form field {:?} ({} bytes)", name, len);
        }
    }

    let bytes = image.ok_or_else(|| UploadRejection::MissingFile(config.upload_field.clone()))?;
    let format = image::guess_format(&bytes).map_err(|_| UploadRejection::NotAnImage)?;
    let extension = format.extensions_str().first().copied().unwrap_or("img");
    let file_name = format!("{:x}.{}", md5::compute(&bytes), extension);

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::write(config.upload_dir.join(&file_name), &bytes).await?;

    Ok(format!("{}/{}", PUBLIC_UPLOADS_PATH, file_name))
}
