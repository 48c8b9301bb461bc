//! Capture & export pipeline: scene -> raster -> PNG -> one-page A4 PDF.
//!
//! The pipeline always consumes the *unscaled* scene (the hidden
//! full-fidelity instance), never the preview, so the preview zoom can't
//! distort the output. Rasterization runs at a fixed 3x oversampling for
//! print-quality sharpness, and the raster's 794x1123 base dimensions are
//! what make the full-bleed A4 embed distortion-free.

use crate::error::PipelineError;
use papier_layout::FontLibrary;
use papier_pdf::{compose_single_page, export_filename};
use papier_raster::Rasterizer;
use papier_scene::Scene;
use papier_schema::DocumentKind;
use papier_traits::ResourceProvider;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Device pixels per scene unit in the export raster.
pub const OVERSAMPLING: u32 = 3;

/// A finished export: the serialized single-page PDF plus the filename it
/// should be saved under.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Writes the document into `dir` under its own filename and returns
    /// the full path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Result of an export trigger.
#[derive(Debug)]
pub enum ExportOutcome {
    Done(ExportedDocument),
    /// Another export was already in flight; the trigger was ignored
    /// (not queued).
    AlreadyInProgress,
}

impl ExportOutcome {
    pub fn document(&self) -> Option<&ExportedDocument> {
        match self {
            ExportOutcome::Done(doc) => Some(doc),
            ExportOutcome::AlreadyInProgress => None,
        }
    }
}

/// Runs the capture steps for one already-rendered scene.
pub(crate) fn run(
    kind: DocumentKind,
    scene: &Scene,
    fonts: &FontLibrary,
    resources: Arc<dyn ResourceProvider>,
    today: chrono::NaiveDate,
) -> Result<ExportedDocument, PipelineError> {
    log::info!("Exporting {:?} at {}x oversampling", kind, OVERSAMPLING);

    let rasterizer = Rasterizer::new(fonts.clone(), resources);
    let pixmap = rasterizer.rasterize(scene, OVERSAMPLING)?;
    let png = Rasterizer::encode_png(&pixmap)?;
    log::debug!("Raster encoded: {} PNG bytes", png.len());

    let bytes = compose_single_page(&png, kind.display_name())?;
    let filename = export_filename(kind.id(), kind.display_name(), today);
    Ok(ExportedDocument { filename, bytes })
}
