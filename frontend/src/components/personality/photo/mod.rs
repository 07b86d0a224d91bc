//! Photo region of the personality block: the upload state machine and the
//! HTTP uploader it is driven with.

pub mod controller;
pub mod uploader;

pub use controller::{AttemptId, PhotoUploadController, PhotoVisualState, SETTLE_DELAY_MS};
pub use uploader::HttpUploader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Where user-facing upload feedback goes.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}
