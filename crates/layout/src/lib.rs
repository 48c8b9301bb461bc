//! Template layout engine: pure rendering from document state to scenes.
//!
//! The single entry point is [`render`]: given a kind, its data, the theme
//! and a font library, it produces the fixed-size [`Scene`] for one page.
//! It is deterministic and total: the same call serves the scaled preview
//! and the unscaled export instance, and absent or malformed field values
//! degrade to placeholders rather than errors.

pub mod compute;
pub mod fonts;
pub mod templates;
pub mod text;

pub use fonts::{FontData, FontInstance, FontLibrary};
pub use text::{StyledRun, TextMeasurer};

use papier_scene::Scene;
use papier_schema::{DocumentData, DocumentKind};
use papier_style::StyleConfig;

/// Renders the page for `kind`. Dispatch is an exhaustive match, so a new
/// `DocumentKind` will not compile until it has a template.
pub fn render(
    kind: DocumentKind,
    data: &DocumentData,
    style: &StyleConfig,
    fonts: &FontLibrary,
) -> Scene {
    match kind {
        DocumentKind::Quote => templates::quote(data, style, fonts),
        DocumentKind::Invoice => templates::invoice(data, style, fonts),
        DocumentKind::Resume => templates::resume(data, style, fonts),
        DocumentKind::CoverLetter => templates::cover_letter(data, style, fonts),
        DocumentKind::PurchaseOrder => templates::purchase_order(data, style, fonts),
        DocumentKind::Certificate => templates::certificate(data, style, fonts),
    }
}

/// Renders the inline error placeholder shown for unroutable slugs.
pub fn render_unknown(style: &StyleConfig, fonts: &FontLibrary) -> Scene {
    templates::unknown(style, fonts)
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::compute::format_eur;
    use papier_schema::ALL_KINDS;
    use papier_types::Color;

    fn fixture() -> (StyleConfig, FontLibrary) {
        // No fonts: measurement falls back to synthetic metrics, which keeps
        // these geometry assertions host-independent.
        (StyleConfig::default(), FontLibrary::new())
    }

    fn scene_text(scene: &Scene) -> Vec<&str> {
        scene.texts().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn test_every_kind_renders_from_blank_data() {
        let (style, fonts) = fixture();
        for kind in ALL_KINDS {
            let data = DocumentData::from_defaults(kind);
            let scene = render(kind, &data, &style, &fonts);
            assert!(
                !scene.elements.is_empty(),
                "{:?} rendered an empty scene",
                kind
            );
            assert_eq!(scene.background, Color::WHITE);
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Invoice);
        data.set("clientName", "ACME SARL");
        data.set("totalTTC", 1200.0);

        let a = render(DocumentKind::Invoice, &data, &style, &fonts);
        let b = render(DocumentKind::Invoice, &data, &style, &fonts);
        assert_eq!(a, b);
    }

    #[test]
    fn test_invoice_two_lines_split_the_total() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Invoice);
        data.set("totalTTC", 1200.0);
        data.set("serviceDescription", "Service A\nService B");

        let scene = render(DocumentKind::Invoice, &data, &style, &fonts);
        let texts = scene_text(&scene);

        assert!(texts.contains(&"Service A"));
        assert!(texts.contains(&"Service B"));
        // Two rows of 600.00 each, tax-inclusive, matching the footer total.
        let per_line = texts.iter().filter(|t| **t == format_eur(600.0)).count();
        assert_eq!(per_line, 2);
        assert!(texts.contains(&"1200.00 €"));
        // The HT/TVA split of the same total.
        assert!(texts.contains(&"1000.00 €"));
        assert!(texts.contains(&"200.00 €"));
    }

    #[test]
    fn test_invoice_empty_description_renders_single_placeholder_row() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Invoice);
        // Whitespace-only: the field placeholder is not substituted (the
        // value is non-empty) but no line survives the split.
        data.set("serviceDescription", "\n  \n");
        data.set("totalTTC", 500.0);

        let scene = render(DocumentKind::Invoice, &data, &style, &fonts);
        let texts = scene_text(&scene);
        assert!(texts.contains(&"Aucun article ajouté."));
    }

    #[test]
    fn test_invoice_blank_description_uses_placeholder_line() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Invoice);
        data.set("totalTTC", 900.0);

        let scene = render(DocumentKind::Invoice, &data, &style, &fonts);
        let texts = scene_text(&scene);
        assert!(texts.contains(&"Description des produits/services..."));
        // One placeholder line carries the whole total.
        assert!(texts.contains(&"900.00 €"));
    }

    #[test]
    fn test_invoice_payment_terms_labels() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Invoice);
        let scene = render(DocumentKind::Invoice, &data, &style, &fonts);
        assert!(scene_text(&scene).contains(&"Conditions : Non spécifié"));

        data.set("paymentTerms", "immediate");
        let scene = render(DocumentKind::Invoice, &data, &style, &fonts);
        assert!(scene_text(&scene).contains(&"Conditions : Paiement Immédiat"));
    }

    #[test]
    fn test_quote_line_amounts_are_tax_exclusive() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Quote);
        data.set("totalTTC", 1200.0);
        data.set("serviceDescription", "Prestation unique");

        let scene = render(DocumentKind::Quote, &data, &style, &fonts);
        let texts = scene_text(&scene);
        // 1200 / 1 line / 1.2 = 1000.00 per row, and the footer repeats the
        // HT total.
        assert!(texts.iter().filter(|t| **t == "1000.00 €").count() >= 2);
        assert!(texts.contains(&"1200.00 €"));
    }

    #[test]
    fn test_quote_missing_dates_show_placeholder() {
        let (style, fonts) = fixture();
        let data = DocumentData::from_defaults(DocumentKind::Quote);
        let scene = render(DocumentKind::Quote, &data, &style, &fonts);
        assert!(scene_text(&scene).contains(&"Date: JJ/MM/AAAA"));
    }

    #[test]
    fn test_purchase_order_items_and_sum() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::PurchaseOrder);
        data.set("itemsOrdered", "Bureau: 300\nChaise: 150.5\nNotice sans prix");

        let scene = render(DocumentKind::PurchaseOrder, &data, &style, &fonts);
        let texts = scene_text(&scene);
        assert!(texts.contains(&"Bureau"));
        assert!(texts.contains(&"300.00 €"));
        assert!(texts.contains(&"150.50 €"));
        // Sum appears twice: the subtotal row and the total band.
        assert_eq!(texts.iter().filter(|t| **t == "450.50 €").count(), 2);
    }

    #[test]
    fn test_resume_renders_skills_as_chips_with_markers_stripped() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Resume);
        data.set("skills", "- Rust\n* Réseaux\nGestion de projet");

        let scene = render(DocumentKind::Resume, &data, &style, &fonts);
        let texts = scene_text(&scene);
        assert!(texts.contains(&"Rust"));
        assert!(texts.contains(&"Réseaux"));
        assert!(texts.contains(&"Gestion de projet"));
    }

    #[test]
    fn test_resume_bold_markup_in_experience() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Resume);
        data.set("experience", "- **2020-2024** Ingénieur logiciel");

        let scene = render(DocumentKind::Resume, &data, &style, &fonts);
        let bold_runs: Vec<_> = scene
            .texts()
            .filter(|t| t.style.weight.is_bold() && t.content.contains("2020-2024"))
            .collect();
        assert!(!bold_runs.is_empty());
    }

    #[test]
    fn test_cover_letter_subject_line() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::CoverLetter);
        data.set("jobTitle", "Développeur Rust");

        let scene = render(DocumentKind::CoverLetter, &data, &style, &fonts);
        let texts: Vec<String> = scene.texts().map(|t| t.content.clone()).collect();
        assert!(
            texts
                .iter()
                .any(|t| t.contains("Objet: Candidature au poste de Développeur Rust"))
        );
        // Schema default closing formula flows through untouched.
        assert!(texts.iter().any(|t| t.contains("Je vous prie d'agréer")));
    }

    #[test]
    fn test_certificate_uppercases_names() {
        let (style, fonts) = fixture();
        let mut data = DocumentData::from_defaults(DocumentKind::Certificate);
        data.set("purpose", "stage");
        data.set("personName", "Jeanne Martin");

        let scene = render(DocumentKind::Certificate, &data, &style, &fonts);
        let texts = scene_text(&scene);
        assert!(texts.contains(&"ATTESTATION DE STAGE"));
        assert!(texts.contains(&"JEANNE MARTIN"));
    }

    #[test]
    fn test_unknown_kind_placeholder() {
        let (style, fonts) = fixture();
        let scene = render_unknown(&style, &fonts);
        let texts = scene_text(&scene);
        assert!(texts.contains(&"Type de document inconnu."));
    }

    #[test]
    fn test_logo_appears_in_invoice_when_set() {
        let (mut style, fonts) = fixture();
        style.logo_url = Some("https://img.example/logo.png".to_string());
        let data = DocumentData::from_defaults(DocumentKind::Invoice);

        let scene = render(DocumentKind::Invoice, &data, &style, &fonts);
        let images: Vec<_> = scene.images().collect();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "https://img.example/logo.png");
    }
}
