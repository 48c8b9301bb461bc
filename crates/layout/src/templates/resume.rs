//! Résumé template ("Curriculum Vitae").
//!
//! Two-column layout: a dark sidebar (photo, contact, skill chips) and a
//! main column whose Profil / Expériences / Formation sections run through
//! the markup parser, so bullets and bold emphasis work in all three.

use super::{Canvas, TextStyleExt, text_or};
use crate::fonts::FontLibrary;
use papier_markup::{parse, strip_marker};
use papier_scene::{ImageFit, PAGE_HEIGHT, PAGE_WIDTH, Scene, TextStyle};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig};
use papier_types::{Color, Rect};

const SIDEBAR_RATIO: f32 = 0.32;

pub fn render(data: &DocumentData, theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);
    let primary = theme.primary_color;
    let secondary = theme.secondary_color;

    let sidebar_width = PAGE_WIDTH * SIDEBAR_RATIO;
    c.fill(Rect::new(0.0, 0.0, sidebar_width, PAGE_HEIGHT), secondary);

    render_sidebar(&mut c, data, theme, sidebar_width);
    render_main(&mut c, data, sidebar_width, primary, secondary);

    c.into_scene()
}

fn render_sidebar(c: &mut Canvas<'_>, data: &DocumentData, theme: &StyleConfig, width: f32) {
    let pad = 32.0;
    let inner_width = width - 2.0 * pad;
    let center = width / 2.0;
    let mut y = pad;

    // Photo slot: round-cropped when a picture is set, a faint empty disc
    // otherwise.
    if let Some(photo) = &theme.logo_url {
        c.image(Rect::new(center - 72.0, y, 144.0, 144.0), photo, ImageFit::Cover, true);
        y += 144.0 + 24.0;
    } else {
        c.fill(
            Rect::new(center - 64.0, y, 128.0, 128.0),
            Color::WHITE.with_alpha(0.05),
        );
        y += 128.0 + 24.0;
    }

    let heading = |c: &Canvas<'_>| {
        c.ts(1.125)
            .bold()
            .color(Color::WHITE.with_alpha(0.9))
    };
    let row_style = c.ts(0.875).color(Color::rgb(0xe5, 0xe7, 0xeb));

    // Contact
    c.text(pad, y, "CONTACT", heading(c));
    y += heading(c).line_height + 4.0;
    c.hline(pad, y, inner_width, 1.0, Color::WHITE.with_alpha(0.2));
    y += 1.0 + 20.0;

    let rows = [
        text_or(data, "email", "email@exemple.com").to_string(),
        text_or(data, "phone", "06 00 00 00 00").to_string(),
        "Ville, Pays".to_string(),
    ];
    for row in rows {
        y += c.wrapped(pad, y, inner_width, &row, row_style.clone());
        y += 12.0;
    }
    y += 24.0;

    // Skills chips
    c.text(pad, y, "COMPÉTENCES", heading(c));
    y += heading(c).line_height + 4.0;
    c.hline(pad, y, inner_width, 1.0, Color::WHITE.with_alpha(0.2));
    y += 1.0 + 20.0;

    let skills: Vec<String> = data
        .text("skills")
        .lines()
        .map(strip_marker)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    if skills.is_empty() {
        c.text(
            pad,
            y,
            "Vos compétences...",
            c.ts(0.875).italic().color(Color::WHITE.with_alpha(0.3)),
        );
        return;
    }

    let chip_style = c.ts(0.75).weight(FontWeight::Medium).color(Color::WHITE);
    let chip_pad_x = 12.0;
    let chip_pad_y = 6.0;
    let chip_gap = 8.0;
    let chip_height = chip_style.line_height + 2.0 * chip_pad_y;
    let mut x = pad;

    for skill in skills {
        let text_width = c.measurer().measure(&skill, &chip_style);
        let chip_width = (text_width + 2.0 * chip_pad_x).min(inner_width);
        if x > pad && x + chip_width > pad + inner_width {
            x = pad;
            y += chip_height + chip_gap;
        }
        c.fill(
            Rect::new(x, y, chip_width, chip_height),
            Color::WHITE.with_alpha(0.1),
        );
        c.text(x + chip_pad_x, y + chip_pad_y, &skill, chip_style.clone());
        x += chip_width + chip_gap;
    }
}

fn render_main(
    c: &mut Canvas<'_>,
    data: &DocumentData,
    sidebar_width: f32,
    primary: Color,
    secondary: Color,
) {
    let pad = 48.0;
    let left = sidebar_width + pad;
    let width = PAGE_WIDTH - sidebar_width - 2.0 * pad;
    let mut y = pad;

    // Name + title header
    let name_style = c.ts(3.0).weight(FontWeight::ExtraBold).line_height(c.base_px() * 3.2);
    let full_name = text_or(data, "fullName", "Prénom Nom").to_uppercase();
    y += c.wrapped(left, y, width, &full_name, name_style);
    y += 12.0;
    let title_style = c.ts(1.5).weight(FontWeight::Medium).color(primary);
    c.text(left, y, &text_or(data, "title", "Poste Visé").to_uppercase(), title_style.clone());
    y += title_style.line_height + 24.0;
    c.hline(left, y, width, 2.0, primary.with_alpha(0.125));
    y += 2.0 + 40.0;

    let body_style = c.ts(0.875).line_height(c.base_px() * 1.5);

    y = section(c, data, "summary", "PROFIL", "Décrivez votre profil professionnel ici...",
        left, y, width, primary, secondary, &body_style, false);
    y = section(c, data, "experience", "EXPÉRIENCES PRO", "Détaillez vos expériences...",
        left, y, width, primary, secondary, &body_style, true);
    section(c, data, "education", "FORMATION", "Vos diplômes et formations...",
        left, y, width, primary, secondary, &body_style, true);
}

#[allow(clippy::too_many_arguments)]
fn section(
    c: &mut Canvas<'_>,
    data: &DocumentData,
    field: &str,
    heading: &str,
    placeholder: &str,
    left: f32,
    mut y: f32,
    width: f32,
    primary: Color,
    secondary: Color,
    body_style: &TextStyle,
    timeline_border: bool,
) -> f32 {
    // Icon tile + heading row
    let tile = 26.0;
    c.fill(Rect::new(left, y, tile, tile), primary);
    let heading_style = c.ts(1.125).bold().color(secondary);
    c.text(left + tile + 12.0, y + (tile - heading_style.line_height) / 2.0, heading, heading_style);
    y += tile + 16.0;

    let raw = data.text(field);
    let segments = parse(raw);

    let (body_x, body_width) = if timeline_border {
        (left + 20.0, width - 20.0)
    } else {
        (left, width)
    };

    let body_top = y;
    if segments.is_empty() {
        c.text(body_x, y, placeholder, body_style.clone().italic().color(super::gray(300)));
        y += body_style.line_height;
    } else {
        y += c.segments(body_x, y, body_width, &segments, body_style);
    }

    if timeline_border {
        c.vline(left, body_top, y - body_top, 2.0, primary.with_alpha(0.19));
    }

    y + 40.0
}
