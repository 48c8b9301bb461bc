//! Inline error placeholder for unroutable document kinds.
//!
//! An unknown routing slug is not fatal: the page shows a dashed warning
//! box instead of a template, and no export is attempted for it.

use super::{Canvas, TextStyleExt, gray};
use crate::fonts::FontLibrary;
use papier_scene::{PAGE_HEIGHT, PAGE_WIDTH, Scene};
use papier_style::{FontWeight, StyleConfig};
use papier_types::{Color, Rect};

pub fn render(theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);

    let box_width = 420.0;
    let box_height = 160.0;
    let rect = Rect::new(
        (PAGE_WIDTH - box_width) / 2.0,
        (PAGE_HEIGHT - box_height) / 2.0,
        box_width,
        box_height,
    );
    c.fill(rect, gray(50));
    c.stroke(rect, gray(300), 2.0);

    let center_x = PAGE_WIDTH / 2.0;
    let warn_style = c.ts(1.5).bold().color(Color::rgb(0xef, 0x44, 0x44));
    c.text_center(center_x, rect.y + 36.0, "!", warn_style.clone());
    c.text_center(
        center_x,
        rect.y + 36.0 + warn_style.line_height + 12.0,
        "Type de document inconnu.",
        c.ts(1.0).weight(FontWeight::SemiBold).color(gray(600)),
    );

    c.into_scene()
}
