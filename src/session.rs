//! The document session: one explicit state value and a closed set of
//! transitions.
//!
//! State is `{ kind, data, style, exporting }`. Mutations are synchronous
//! and strictly ordered by call arrival; none of them overlap an export's
//! suspension points because the export reads an immutable snapshot (its
//! own rendered scene). Content lives only in this struct for the lifetime
//! of the session: nothing is persisted anywhere, and no field value ever
//! leaves the process except the logo bytes handed to the ingestion
//! service.

use crate::error::PipelineError;
use crate::export::{self, ExportOutcome};
use papier_layout::{FontLibrary, render};
use papier_scene::Scene;
use papier_schema::{DocumentData, DocumentKind, FieldValue};
use papier_style::{StyleConfig, StylePatch};
use papier_traits::{ImageIngest, ResourceProvider, UploadedImage};
use std::sync::Arc;

pub struct DocumentSession {
    kind: DocumentKind,
    data: DocumentData,
    style: StyleConfig,
    exporting: bool,
    fonts: FontLibrary,
    resources: Arc<dyn ResourceProvider>,
    ingest: Option<Arc<dyn ImageIngest>>,
}

impl DocumentSession {
    pub fn builder(kind: DocumentKind) -> SessionBuilder {
        SessionBuilder::new(kind)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn data(&self) -> &DocumentData {
        &self.data
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Switches the active template. Document data is rebuilt from the new
    /// schema's defaults (nothing carries over) while the style survives
    /// untouched.
    pub fn set_kind(&mut self, kind: DocumentKind) {
        log::debug!("Switching template {:?} -> {:?}", self.kind, kind);
        self.kind = kind;
        self.data = DocumentData::from_defaults(kind);
    }

    /// Applies one field edit. Unknown ids are dropped by the data layer.
    pub fn update_field(&mut self, id: &str, value: impl Into<FieldValue>) {
        self.data.set(id, value);
    }

    /// Applies a partial style update; untouched fields keep their values.
    pub fn update_style(&mut self, patch: StylePatch) {
        self.style.apply(patch);
    }

    /// The "export in progress" transition, exposed so embedders driving
    /// their own event loop can guard and clear explicitly.
    pub fn set_exporting(&mut self, exporting: bool) {
        self.exporting = exporting;
    }

    /// Uploads logo bytes through the configured ingestion service and, on
    /// success only, stores the returned hosted URL in the style. A failed
    /// upload leaves the current logo reference untouched.
    pub fn upload_logo(
        &mut self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<UploadedImage, PipelineError> {
        let ingest = self.ingest.as_ref().ok_or(PipelineError::NoIngestService)?;
        match ingest.upload(bytes, filename) {
            Ok(uploaded) => {
                log::info!("Logo uploaded: {}", uploaded.url);
                self.style.logo_url = Some(uploaded.url.clone());
                Ok(uploaded)
            }
            Err(e) => {
                log::warn!("Logo upload failed, keeping previous logo: {}", e);
                Err(e.into())
            }
        }
    }

    /// Renders the scene for the visible preview instance. The display
    /// scale from the preview engine applies as a transform on top of
    /// this; it never changes the scene itself.
    pub fn preview_scene(&self) -> Scene {
        render(self.kind, &self.data, &self.style, &self.fonts)
    }

    /// Renders the hidden, unscaled export instance. Same pure render as
    /// the preview, invoked independently, so preview transforms cannot
    /// leak in.
    pub fn export_scene(&self) -> Scene {
        render(self.kind, &self.data, &self.style, &self.fonts)
    }

    /// Runs the full export pipeline, guarded to at most one in-flight
    /// export: a second trigger is a no-op, not a queue. The in-progress
    /// flag is cleared on success and failure alike.
    pub fn export(&mut self) -> Result<ExportOutcome, PipelineError> {
        if self.exporting {
            log::info!("Export already in progress; ignoring trigger");
            return Ok(ExportOutcome::AlreadyInProgress);
        }
        self.exporting = true;

        let scene = self.export_scene();
        let result = export::run(
            self.kind,
            &scene,
            &self.fonts,
            self.resources.clone(),
            chrono::Local::now().date_naive(),
        );

        // Unconditional cleanup: the session must never stay stuck in
        // "exporting", whatever happened above.
        self.exporting = false;
        result.map(ExportOutcome::Done)
    }
}

/// Builder wiring a session to its platform collaborators.
pub struct SessionBuilder {
    kind: DocumentKind,
    style: StyleConfig,
    fonts: Option<FontLibrary>,
    resources: Option<Arc<dyn ResourceProvider>>,
    ingest: Option<Arc<dyn ImageIngest>>,
}

impl SessionBuilder {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            style: StyleConfig::default(),
            fonts: None,
            resources: None,
            ingest: None,
        }
    }

    /// Resolves a routing slug, or reports `UnknownKind` so the caller can
    /// show the inline placeholder instead of a session.
    pub fn from_route_slug(slug: &str) -> Result<Self, PipelineError> {
        DocumentKind::from_route_slug(slug)
            .map(Self::new)
            .ok_or_else(|| PipelineError::UnknownKind(slug.to_string()))
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn with_ingest(mut self, ingest: Arc<dyn ImageIngest>) -> Self {
        self.ingest = Some(ingest);
        self
    }

    pub fn build(self) -> DocumentSession {
        let fonts = self.fonts.unwrap_or_else(default_fonts);
        let resources = self
            .resources
            .unwrap_or_else(|| Arc::new(papier_resource::HttpResourceProvider::new()));
        DocumentSession {
            kind: self.kind,
            data: DocumentData::from_defaults(self.kind),
            style: self.style,
            exporting: false,
            fonts,
            resources,
            ingest: self.ingest,
        }
    }
}

#[cfg(feature = "system-fonts")]
fn default_fonts() -> FontLibrary {
    FontLibrary::new().with_system_fonts(true)
}

#[cfg(not(feature = "system-fonts"))]
fn default_fonts() -> FontLibrary {
    FontLibrary::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use papier_traits::{ImageIngest, IngestError, InMemoryResourceProvider, UploadedImage};

    fn session(kind: DocumentKind) -> DocumentSession {
        DocumentSession::builder(kind)
            .with_fonts(FontLibrary::new())
            .with_resources(Arc::new(InMemoryResourceProvider::new()))
            .build()
    }

    struct FixedIngest {
        result: Result<UploadedImage, ()>,
    }

    impl ImageIngest for FixedIngest {
        fn upload(&self, _bytes: &[u8], filename: &str) -> Result<UploadedImage, IngestError> {
            match &self.result {
                Ok(img) => Ok(img.clone()),
                Err(()) => Err(IngestError::Rejected {
                    status: 500,
                    message: format!("cannot process {}", filename),
                }),
            }
        }
    }

    #[test]
    fn test_kind_switch_resets_data_to_defaults() {
        let mut s = session(DocumentKind::Invoice);
        s.update_field("clientName", "ACME");
        s.update_field("totalTTC", 1200.0);
        assert_eq!(s.data().text("clientName"), "ACME");

        s.set_kind(DocumentKind::Quote);
        // Same field id exists on quotes, but the value must not carry over.
        assert_eq!(s.data().text("clientName"), "");
        assert_eq!(s.data().number("validityDays"), Some(30.0));
        assert_eq!(s.data().number("totalTTC"), None);
    }

    #[test]
    fn test_kind_switch_keeps_style() {
        let mut s = session(DocumentKind::Invoice);
        s.update_style(StylePatch {
            font_size: Some(12.0),
            ..StylePatch::default()
        });
        s.set_kind(DocumentKind::Resume);
        assert_eq!(s.style().font_size, 12.0);
    }

    #[test]
    fn test_preview_and_export_scenes_are_identical() {
        let mut s = session(DocumentKind::Invoice);
        s.update_field("clientName", "ACME");
        s.update_field("totalTTC", 600.0);
        assert_eq!(s.preview_scene(), s.export_scene());
    }

    #[test]
    fn test_export_trigger_is_noop_while_in_flight() {
        let mut s = session(DocumentKind::Invoice);
        s.set_exporting(true);
        let outcome = s.export().unwrap();
        assert!(matches!(outcome, ExportOutcome::AlreadyInProgress));
        // The guard refuses without clearing a flag someone else owns.
        assert!(s.is_exporting());

        s.set_exporting(false);
        let outcome = s.export().unwrap();
        assert!(matches!(outcome, ExportOutcome::Done(_)));
        assert!(!s.is_exporting());
    }

    #[test]
    fn test_upload_success_stores_url() {
        let ingest = FixedIngest {
            result: Ok(UploadedImage {
                url: "https://img.example/logo-1.png".to_string(),
                filename: "logo-1.png".to_string(),
                content_type: Some("image/png".to_string()),
            }),
        };
        let mut s = DocumentSession::builder(DocumentKind::Quote)
            .with_fonts(FontLibrary::new())
            .with_resources(Arc::new(InMemoryResourceProvider::new()))
            .with_ingest(Arc::new(ingest))
            .build();

        s.upload_logo(b"png bytes", "logo.png").unwrap();
        assert_eq!(s.style().logo_url.as_deref(), Some("https://img.example/logo-1.png"));
    }

    #[test]
    fn test_upload_failure_leaves_style_unchanged() {
        let mut s = DocumentSession::builder(DocumentKind::Quote)
            .with_fonts(FontLibrary::new())
            .with_resources(Arc::new(InMemoryResourceProvider::new()))
            .with_ingest(Arc::new(FixedIngest { result: Err(()) }))
            .build();
        s.update_style(StylePatch {
            logo_url: Some(Some("https://img.example/old.png".to_string())),
            ..StylePatch::default()
        });

        let result = s.upload_logo(b"bytes", "new.png");
        assert!(matches!(result, Err(PipelineError::Upload(_))));
        assert_eq!(s.style().logo_url.as_deref(), Some("https://img.example/old.png"));
    }

    #[test]
    fn test_upload_without_service_is_an_error() {
        let mut s = session(DocumentKind::Quote);
        assert!(matches!(
            s.upload_logo(b"bytes", "logo.png"),
            Err(PipelineError::NoIngestService)
        ));
    }

    #[test]
    fn test_unknown_route_slug_is_reported() {
        let err = SessionBuilder::from_route_slug("note-de-frais").err();
        assert!(matches!(err, Some(PipelineError::UnknownKind(_))));

        let ok = SessionBuilder::from_route_slug("facture-simple-facture");
        assert!(ok.is_ok());
    }
}
