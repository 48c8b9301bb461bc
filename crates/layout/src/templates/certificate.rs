//! Certificate template ("Attestation Générique").

use super::{Canvas, TextStyleExt, centered, gray, text_or};
use crate::compute::format_date_fr;
use crate::fonts::FontLibrary;
use papier_markup::Span;
use papier_scene::{ImageFit, PAGE_HEIGHT, PAGE_WIDTH, Scene};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig};
use papier_types::Rect;

const MARGIN: f32 = 48.0;

const BODY_PLACEHOLDER: &str = "Veuillez insérer ici le texte libre de l'attestation, \
expliquant le but de ce document et certifiant les faits mentionnés ci-dessus. \
Ce document est officiel et doit être traité comme tel.";

pub fn render(data: &DocumentData, theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);
    let left = MARGIN;
    let right = PAGE_WIDTH - MARGIN;
    let content_width = right - left;
    let center = left + content_width / 2.0;
    let primary = theme.primary_color;

    let organisation = text_or(data, "companyName", "Nom de l'Organisme");
    let purpose = text_or(data, "purpose", "OBJET").to_uppercase();

    // --- Centered header ---
    let mut y = MARGIN;
    if let Some(logo) = &theme.logo_url {
        c.image(Rect::new(center - 48.0, y, 96.0, 96.0), logo, ImageFit::Contain, false);
        y += 96.0 + 24.0;
    }
    let title_style = c.ts(1.875).weight(FontWeight::ExtraBold);
    c.text_center(center, y, &format!("ATTESTATION DE {}", purpose), title_style.clone());
    y += title_style.line_height + 8.0;
    c.fill(Rect::new(center - 48.0, y, 96.0, 6.0), primary);
    y += 6.0 + 48.0;

    // --- Declaration line, organisation emphasized in primary ---
    let intro_style = c.ts(1.125).weight(FontWeight::SemiBold);
    let spans = vec![
        Span { text: "Je soussigné(e), ".to_string(), bold: false },
        Span { text: format!("{},", organisation.to_uppercase()), bold: true },
        Span { text: " certifie par la présente que :".to_string(), bold: false },
    ];
    y += c.spans_accented(left, y, content_width, &spans, &intro_style, primary);
    y += 32.0;

    // --- Framed facts panel ---
    let pad = 24.0;
    let label_style = c.ts(1.0).weight(FontWeight::SemiBold);
    let row_gap = 16.0;
    let name_style = c.ts(1.125).bold();
    let value_style = c.ts(1.0);
    let panel_height = pad
        + name_style.line_height
        + row_gap
        + value_style.line_height
        + row_gap
        + value_style.line_height
        + pad;

    let panel = Rect::new(left, y, content_width, panel_height);
    c.fill(panel, theme.accent_color.with_alpha(0.125));
    c.stroke(panel, gray(200), 1.0);
    c.vline(left, y, panel_height, 8.0, primary);

    let label_x = left + pad;
    let value_x = left + pad + 128.0;
    let mut py = y + pad;
    c.text(label_x, py, "Nom et Prénom :", label_style.clone());
    c.text(
        value_x,
        py,
        &text_or(data, "personName", "Nom de la Personne").to_uppercase(),
        name_style,
    );
    py += c.ts(1.125).line_height + row_gap;
    c.text(label_x, py, "Date Clé :", label_style.clone());
    c.text(value_x, py, &format_date_fr(data.text("personDate")), value_style.clone());
    py += value_style.line_height + row_gap;
    c.text(label_x, py, "Qualité :", label_style.clone());
    c.text(
        value_x,
        py,
        text_or(data, "personRole", "Rôle/Fonction"),
        c.ts(1.0).italic(),
    );

    y += panel_height + 32.0;

    // --- Free text ---
    let body = text_or(data, "attestationText", BODY_PLACEHOLDER);
    y += c.wrapped(left, y, content_width, body, c.ts(1.0).line_height(c.base_px() * 1.6));
    y += 48.0;
    c.text(
        left,
        y,
        "La présente attestation est établie pour servir et valoir ce que de droit.",
        c.ts(0.875).italic().faded(),
    );

    // --- Signature footer ---
    let sign_name_style = c.ts(1.0).bold();
    let sign_note_style = c.ts(0.75).color(gray(500));
    let made_style = c.ts(1.0).weight(FontWeight::SemiBold);
    let footer_height = made_style.line_height
        + 32.0
        + sign_name_style.line_height
        + 8.0
        + sign_note_style.line_height
        + 32.0
        + 1.0;
    let mut fy = PAGE_HEIGHT - MARGIN - footer_height;

    let city = text_or(data, "citySign", "Ville");
    let signed = format_date_fr(data.text("dateSign"));
    c.text_right(right, fy, &format!("Fait à {}, le {}.", city, signed), made_style);
    fy += c.ts(1.0).line_height + 32.0;

    let block_width: f32 = 200.0;
    let block_center = right - block_width / 2.0;
    c.text_center(block_center, fy, organisation, sign_name_style);
    fy += c.ts(1.0).line_height + 8.0;
    c.text_center(block_center, fy, "Cachet et Signature", centered(sign_note_style));
    fy += c.ts(0.75).line_height + 32.0;
    c.hline(right - block_width, fy, block_width, 1.0, gray(300));

    c.into_scene()
}
