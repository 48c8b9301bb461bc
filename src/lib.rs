//! # papier
//!
//! Fixed-layout document rendering and export. A session holds one
//! document's data and visual style, renders it through a per-kind
//! template into a fixed A4 visual tree, and exports that tree as a
//! single-page PDF carrying a print-sharp raster of the page.
//!
//! The architecture is layered the same way the crates are:
//! - **schema / style**: the data model (static field tables, mutable
//!   content, theming)
//! - **markup**: the lightweight rich-text interpreter for free-text
//!   fields
//! - **layout**: pure template renderers producing [`papier_scene`]
//!   scenes
//! - **raster / pdf**: the capture pipeline (oversampled rasterization,
//!   PNG encoding, full-bleed A4 composition)
//! - this crate: the session state machine, the preview scale engine, and
//!   the export orchestration
//!
//! The one invariant that shapes everything: the preview and the export
//! are two independent invocations of the same pure render, and the
//! preview's display scale is a transform that the export path never
//! sees.

pub mod error;
pub mod export;
pub mod ingest;
pub mod preview;
pub mod session;

// Re-export foundation crates
pub use papier_layout as layout;
pub use papier_markup as markup;
pub use papier_raster as raster;
pub use papier_scene as scene;
pub use papier_schema as schema;
pub use papier_style as style;
pub use papier_traits as traits;
pub use papier_types as types;

// Re-export commonly used types
pub use error::PipelineError;
pub use export::{ExportOutcome, ExportedDocument, OVERSAMPLING};
pub use ingest::HttpIngestClient;
pub use papier_layout::{FontLibrary, render, render_unknown};
pub use papier_resource::{FilesystemResourceProvider, HttpResourceProvider, InMemoryResourceProvider};
pub use papier_scene::{PAGE_HEIGHT, PAGE_WIDTH, Scene};
pub use papier_schema::{ALL_KINDS, DocumentData, DocumentKind, FieldValue, schema_for};
pub use papier_style::{FONT_CHOICES, StyleConfig, StylePatch};
pub use papier_types::Color;
pub use preview::{MIN_SCALE, PreviewScaler, PreviewTransform};
pub use session::{DocumentSession, SessionBuilder};
