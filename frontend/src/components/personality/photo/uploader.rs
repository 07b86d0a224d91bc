//! Sends a chosen photo to the configured endpoint as `multipart/form-data`.
//!
//! The request carries the file under the configured field name, one text part per
//! `additionalRequestData` entry and one header per `additionalRequestHeaders`
//! entry. The answer is an [`UploadOutcome`]; a non-2xx status is a transmission
//! failure that reuses the server's `message` when it sent one.

use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use common::model::config::{accepted_types, mime_matches, UploaderConfig};
use common::model::upload::{UploadError, UploadOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct HttpUploader {
    config: UploaderConfig,
}

impl HttpUploader {
    pub fn new(config: UploaderConfig) -> Self {
        Self { config }
    }

    /// Value for the file input's `accept` attribute.
    pub fn accept_types(&self) -> &str {
        accepted_types(&self.config.types)
    }

    /// Rejects files whose MIME type is not in the accepted set.
    pub fn accept(&self, file: &File) -> Result<(), UploadError> {
        let file = gloo_file::File::from(file.clone());
        if mime_matches(&self.config.types, &file.raw_mime_type()) {
            Ok(())
        } else {
            Err(UploadError::Selection(format!(
                "\"{}\" is not an accepted file type",
                file.name()
            )))
        }
    }

    pub async fn upload(&self, file: File) -> Result<UploadOutcome, UploadError> {
        if self.config.endpoint.trim().is_empty() {
            return Err(UploadError::Transmission(
                "Upload endpoint is not configured".to_string(),
            ));
        }

        let form = self.form_data(&file)?;
        let mut request = Request::post(&self.config.endpoint);
        for (name, value) in &self.config.additional_request_headers {
            request = request.header(name, value);
        }

        let response = request
            .body(form)
            .map_err(|e| UploadError::Transmission(e.to_string()))?
            .send()
            .await
            .map_err(|e| UploadError::Transmission(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transmission(e.to_string()))?;

        UploadOutcome::from_response(status, &body)
    }

    fn form_data(&self, file: &File) -> Result<FormData, UploadError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(&self.config.field, file, &file.name())
            .map_err(js_error)?;
        for (name, value) in &self.config.additional_request_data {
            form.append_with_str(name, value).map_err(js_error)?;
        }
        Ok(form)
    }
}

fn js_error(err: JsValue) -> UploadError {
    UploadError::Transmission(
        err.as_string()
            .unwrap_or_else(|| "Could not prepare the upload request".to_string()),
    )
}
