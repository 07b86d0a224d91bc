//! # Upload Service Module
//!
//! Image uploads for the personality block's photo.
//!
//! ## Routes
//!
//! *   **`POST /api/uploads/image`**:
//!     - **Handler**: `upload::process`
//!     - **Description**: Accepts a `multipart/form-data` body with the image under the
//!       configured field (default `image`). Extra text parts sent by the block's
//!       `additionalRequestData` are accepted and ignored. The file is checked to be an
//!       image, stored under a name derived from its MD5 hash, and answered with an
//!       `UploadOutcome` JSON: `{"success":1,"file":{"url":"/uploads/<md5>.<ext>"}}`.
//!       Failures answer `{"success":0,"message":"..."}`.
//!
//! *   **`GET /uploads/*`**: serves the stored files (see [`stored_files`]).

mod upload;

use actix_files::Files;
use actix_web::web::{post, scope};
use actix_web::Scope;

use crate::config::{ServerConfig, PUBLIC_UPLOADS_PATH};

/// The base path for upload endpoints.
const API_PATH: &str = "/api/uploads";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/image", post().to(upload::process))
}

/// Static file service for everything stored by `POST /api/uploads/image`.
pub fn stored_files(config: &ServerConfig) -> Files {
    Files::new(PUBLIC_UPLOADS_PATH, config.upload_dir.clone())
}
