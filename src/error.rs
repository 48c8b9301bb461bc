//! Unified error type for the document pipeline.

use papier_pdf::ComposeError;
use papier_raster::RasterError;
use papier_traits::{IngestError, ResourceError};
use thiserror::Error;

/// The main error enum for all high-level operations within the engine.
///
/// Absent field values are never errors (templates render placeholders),
/// so everything here is a genuine pipeline failure: transport, encoding,
/// or routing.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rasterization error: {0}")]
    Raster(#[from] RasterError),

    #[error("PDF composition error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Logo upload failed: {0}")]
    Upload(#[from] IngestError),

    #[error("No logo ingestion service is configured for this session")]
    NoIngestService,

    #[error("No document template for '{0}'")]
    UnknownKind(String),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
