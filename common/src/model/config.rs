//! Block configuration as supplied by the host editor.
//!
//! Every key is optional; missing keys fall back to the defaults below. Keys are
//! camelCase on the wire (`namePlaceholder`, `additionalRequestData`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::personality::TextField;

pub const DEFAULT_FIELD: &str = "image";
pub const DEFAULT_TYPES: &str = "image/*";
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u32 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalityConfig {
    /// Upload URL. Uploads fail with a transmission error while this is empty.
    pub endpoint: String,
    /// Multipart form field the file is sent under.
    pub field: String,
    /// Accepted MIME patterns, comma separated.
    pub types: String,
    pub name_placeholder: String,
    pub description_placeholder: String,
    pub link_placeholder: String,
    pub photo_caption_placeholder: String,
    pub photo_sub_caption_placeholder: String,
    /// Extra text parts appended to every upload request.
    pub additional_request_data: BTreeMap<String, String>,
    /// Extra headers sent with every upload request.
    pub additional_request_headers: BTreeMap<String, String>,
    /// How long an upload may stay in flight before it is failed.
    pub upload_timeout_ms: u32,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            field: DEFAULT_FIELD.to_string(),
            types: DEFAULT_TYPES.to_string(),
            name_placeholder: "Name".to_string(),
            description_placeholder: "Description".to_string(),
            link_placeholder: "Link".to_string(),
            photo_caption_placeholder: "Caption".to_string(),
            photo_sub_caption_placeholder: "Sub Caption".to_string(),
            additional_request_data: BTreeMap::new(),
            additional_request_headers: BTreeMap::new(),
            upload_timeout_ms: DEFAULT_UPLOAD_TIMEOUT_MS,
        }
    }
}

/// The subset of [`PersonalityConfig`] the uploader needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    pub endpoint: String,
    pub field: String,
    pub types: String,
    pub additional_request_data: BTreeMap<String, String>,
    pub additional_request_headers: BTreeMap<String, String>,
}

impl PersonalityConfig {
    pub fn placeholder(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name_placeholder,
            TextField::Description => &self.description_placeholder,
            TextField::Link => &self.link_placeholder,
            TextField::PhotoCaption => &self.photo_caption_placeholder,
            TextField::PhotoSubCaption => &self.photo_sub_caption_placeholder,
        }
    }

    pub fn uploader(&self) -> UploaderConfig {
        UploaderConfig {
            endpoint: self.endpoint.clone(),
            field: self.field.clone(),
            types: self.types.clone(),
            additional_request_data: self.additional_request_data.clone(),
            additional_request_headers: self.additional_request_headers.clone(),
        }
    }
}

/// The pattern list actually in force: a blank `types` falls back to
/// [`DEFAULT_TYPES`], for the picker's `accept` attribute and for
/// [`mime_matches`] alike.
pub fn accepted_types(types: &str) -> &str {
    if types.split(',').all(|p| p.trim().is_empty()) {
        DEFAULT_TYPES
    } else {
        types
    }
}

/// Checks `mime` against a comma separated list of patterns such as
/// `image/*, application/pdf`.
///
/// `*` and `*/*` accept anything. Matching is ASCII case-insensitive. An empty
/// MIME type (the browser could not tell) only matches the catch-all patterns.
/// A blank list means [`DEFAULT_TYPES`].
pub fn mime_matches(patterns: &str, mime: &str) -> bool {
    let patterns = accepted_types(patterns);
    let mime = mime.trim().to_ascii_lowercase();
    let (kind, subtype) = mime.split_once('/').unwrap_or((mime.as_str(), ""));

    patterns
        .split(',')
        .map(|p| p.trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty())
        .any(|pattern| match pattern.split_once('/') {
            None => pattern == "*",
            Some(("*", "*")) => true,
            Some((p_kind, "*")) => !subtype.is_empty() && p_kind == kind,
            Some((p_kind, p_sub)) => p_kind == kind && p_sub == subtype,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: PersonalityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PersonalityConfig::default());
        assert_eq!(config.field, "image");
        assert_eq!(config.types, "image/*");
        assert_eq!(config.placeholder(TextField::PhotoSubCaption), "Sub Caption");
        assert_eq!(config.upload_timeout_ms, 30_000);
    }

    #[test]
    fn reads_camel_case_keys() {
        let config: PersonalityConfig = serde_json::from_str(
            r#"{
                "endpoint": "/api/uploads/image",
                "namePlaceholder": "Full name",
                "additionalRequestData": {"folder": "people"},
                "additionalRequestHeaders": {"X-Token": "abc"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.placeholder(TextField::Name), "Full name");
        assert_eq!(config.placeholder(TextField::Link), "Link");

        let uploader = config.uploader();
        assert_eq!(uploader.endpoint, "/api/uploads/image");
        assert_eq!(uploader.additional_request_data["folder"], "people");
        assert_eq!(uploader.additional_request_headers["X-Token"], "abc");
    }

    #[test]
    fn wildcard_subtype_matches_family() {
        assert!(mime_matches("image/*", "image/png"));
        assert!(mime_matches("image/*", "IMAGE/JPEG"));
        assert!(!mime_matches("image/*", "application/pdf"));
        assert!(!mime_matches("image/*", ""));
    }

    #[test]
    fn pattern_lists_and_catch_alls() {
        assert!(mime_matches("image/png, image/gif", "image/gif"));
        assert!(!mime_matches("image/png, image/gif", "image/jpeg"));
        assert!(mime_matches("*/*", "text/plain"));
        assert!(mime_matches("*", ""));
    }

    #[test]
    fn blank_types_fall_back_to_images() {
        assert_eq!(accepted_types(""), DEFAULT_TYPES);
        assert_eq!(accepted_types(" , "), DEFAULT_TYPES);
        assert_eq!(accepted_types("image/png"), "image/png");

        assert!(mime_matches("", "image/png"));
        assert!(mime_matches("  ", "image/webp"));
        assert!(!mime_matches("", "application/pdf"));

        let config: PersonalityConfig = serde_json::from_str(r#"{"types": ""}"#).unwrap();
        assert_eq!(accepted_types(&config.uploader().types), "image/*");
    }
}
