//! HTTP client for the logo ingestion service.
//!
//! The service accepts a single multipart file upload and answers with the
//! hosted URL of the normalized image (resized into an 800x800 box and
//! re-encoded per source format server-side; other formats pass through).
//! This client only speaks that interface; it never processes image
//! bytes itself.

use papier_traits::{ImageIngest, IngestError, UploadedImage};
use serde::Deserialize;
use std::time::Duration;

pub struct HttpIngestClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpIngestClient {
    /// `endpoint` is the full upload URL, e.g. `https://host/api/upload`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { endpoint: endpoint.into(), client }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
    filename: String,
    #[serde(default, rename = "contentType")]
    content_type: Option<String>,
}

impl ImageIngest for HttpIngestClient {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedImage, IngestError> {
        let part = reqwest::blocking::multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string());
        let form = reqwest::blocking::multipart::Form::new().part("file", part);

        log::debug!("Uploading {} ({} bytes) to {}", filename, bytes.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| IngestError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| String::new());
            return Err(IngestError::Rejected { status: status.as_u16(), message });
        }

        let parsed: UploadResponse = response
            .json()
            .map_err(|e| IngestError::MalformedResponse(e.to_string()))?;
        Ok(UploadedImage {
            url: parsed.url,
            filename: parsed.filename,
            content_type: parsed.content_type,
        })
    }
}
