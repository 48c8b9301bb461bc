pub mod font;
pub mod ingest;
pub mod resource;

pub use font::{FontError, FontProvider, FontQuery, InMemoryFontProvider, SharedFontData};
pub use ingest::{ImageIngest, IngestError, UploadedImage};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
