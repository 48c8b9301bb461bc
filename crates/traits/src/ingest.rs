//! Consumed interface of the logo ingestion service.
//!
//! The service itself is an external collaborator: it accepts one uploaded
//! image, bounds it to an 800x800 box (preserving aspect ratio, never
//! upscaling), re-encodes JPEG/PNG/WEBP with per-format quality settings,
//! passes any other format through unmodified, and hosts the result at a
//! URL that permits cross-origin reads so the export rasterizer can fetch
//! it back. The engine only ever sees that contract through this trait.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The service answered with a non-success status.
    #[error("Upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout...).
    #[error("Upload transport error: {0}")]
    Transport(String),

    /// A success status carrying a payload we could not understand.
    #[error("Malformed upload response: {0}")]
    MalformedResponse(String),
}

/// The normalized, hosted image returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Stable, publicly fetchable URL of the processed image.
    pub url: String,
    /// Filename the service stored the image under.
    pub filename: String,
    /// Content type after server-side re-encoding, when reported.
    pub content_type: Option<String>,
}

/// Uploads raw image bytes and returns the hosted, normalized result.
pub trait ImageIngest: Send + Sync {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedImage, IngestError>;
}
