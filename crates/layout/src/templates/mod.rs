//! The per-kind template renderers.
//!
//! Every template is a pure function from `(data, style, fonts)` to a
//! [`Scene`]: fixed A4 geometry, content flowing top-down inside it, footers
//! pinned to the bottom edge. Absent fields render their placeholder text;
//! a template never fails.

mod certificate;
mod cover_letter;
mod invoice;
mod purchase_order;
mod quote;
mod resume;
mod unknown;

pub use certificate::render as certificate;
pub use cover_letter::render as cover_letter;
pub use invoice::render as invoice;
pub use purchase_order::render as purchase_order;
pub use quote::render as quote;
pub use resume::render as resume;
pub use unknown::render as unknown;

use crate::fonts::FontLibrary;
use crate::text::{StyledRun, TextMeasurer, bolded};
use papier_markup::{Segment, SegmentKind};
use papier_scene::{Element, ImageElement, ImageFit, Scene, TextElement, TextStyle};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig, TextAlign};
use papier_types::{Color, Rect};

/// CSS pixels per typographic point at the page's 96 DPI.
pub(crate) const PX_PER_PT: f32 = 96.0 / 72.0;

/// Tailwind-ish gray ramp the templates lean on for chrome.
pub(crate) fn gray(step: u16) -> Color {
    match step {
        50 => Color::rgb(0xf9, 0xfa, 0xfb),
        100 => Color::rgb(0xf3, 0xf4, 0xf6),
        200 => Color::rgb(0xe5, 0xe7, 0xeb),
        300 => Color::rgb(0xd1, 0xd5, 0xdb),
        400 => Color::rgb(0x9c, 0xa3, 0xaf),
        500 => Color::rgb(0x6b, 0x72, 0x80),
        _ => Color::rgb(0x37, 0x41, 0x51),
    }
}

/// Drawing surface shared by the templates: the scene under construction
/// plus the measuring tools and the active theme.
pub(crate) struct Canvas<'a> {
    pub scene: Scene,
    pub theme: &'a StyleConfig,
    fonts: &'a FontLibrary,
}

impl<'a> Canvas<'a> {
    pub fn new(theme: &'a StyleConfig, fonts: &'a FontLibrary) -> Self {
        Self { scene: Scene::page(theme.page_background), theme, fonts }
    }

    pub fn measurer(&self) -> TextMeasurer<'a> {
        TextMeasurer::new(self.fonts)
    }

    /// Base font size in page pixels (the theme's point size at 96 DPI).
    pub fn base_px(&self) -> f32 {
        self.theme.font_size * PX_PER_PT
    }

    /// A text style at `ratio` times the base size, in the theme's font and
    /// secondary color.
    pub fn ts(&self, ratio: f32) -> TextStyle {
        let size = self.base_px() * ratio;
        TextStyle::new(self.theme.font_family.clone(), size, self.theme.secondary_color)
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.scene.push_fill(rect, color);
    }

    pub fn stroke(&mut self, rect: Rect, color: Color, width: f32) {
        self.scene.push_stroke(rect, color, width);
    }

    /// A horizontal rule: the templates' borders are thin fills.
    pub fn hline(&mut self, x: f32, y: f32, width: f32, thickness: f32, color: Color) {
        self.fill(Rect::new(x, y, width, thickness), color);
    }

    pub fn vline(&mut self, x: f32, y: f32, height: f32, thickness: f32, color: Color) {
        self.fill(Rect::new(x, y, thickness, height), color);
    }

    pub fn image(&mut self, rect: Rect, src: &str, fit: ImageFit, rounded: bool) {
        self.scene.push(
            rect,
            Element::Image(ImageElement { src: src.to_string(), fit, rounded }),
        );
    }

    /// One line of text at (x, y). Returns its measured width.
    pub fn text(&mut self, x: f32, y: f32, content: &str, style: TextStyle) -> f32 {
        let width = self.measurer().measure(content, &style);
        let rect = Rect::new(x, y, width, style.line_height);
        self.scene.push_text(rect, content, style);
        width
    }

    /// One line of text ending at `right`.
    pub fn text_right(&mut self, right: f32, y: f32, content: &str, style: TextStyle) -> f32 {
        let width = self.measurer().measure(content, &style);
        let rect = Rect::new(right - width, y, width, style.line_height);
        self.scene.push_text(rect, content, style);
        width
    }

    /// One line of text centered on `center_x`.
    pub fn text_center(&mut self, center_x: f32, y: f32, content: &str, style: TextStyle) {
        let width = self.measurer().measure(content, &style);
        let rect = Rect::new(center_x - width / 2.0, y, width, style.line_height);
        self.scene.push_text(rect, content, style);
    }

    /// A word-wrapped block. Emits a single multi-line element (alignment
    /// is applied per line by the painter) and returns the height consumed.
    pub fn wrapped(&mut self, x: f32, y: f32, width: f32, text: &str, style: TextStyle) -> f32 {
        let lines = self.measurer().wrap(text, &style, width);
        let height = lines.len() as f32 * style.line_height;
        let rect = Rect::new(x, y, width, height);
        self.scene.push_text(rect, lines.join("\n"), style);
        height
    }

    /// Renders parsed markup segments: paragraphs and bullets with bold
    /// runs. Returns the height consumed. Empty input renders nothing;
    /// callers pass a placeholder beforehand when they need one.
    pub fn segments(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        segments: &[Segment],
        style: &TextStyle,
    ) -> f32 {
        let paragraph_gap = 8.0;
        let bullet_gap = 4.0;
        let mut cursor = y;

        for segment in segments {
            match segment.kind {
                SegmentKind::Paragraph => {
                    cursor += self.runs_block(x, cursor, width, segment, style);
                    cursor += paragraph_gap;
                }
                SegmentKind::Bullet => {
                    let marker_style = style.clone();
                    let marker_width = self.measurer().measure("•", &marker_style);
                    self.text(x + 8.0, cursor, "•", marker_style);
                    let indent = 8.0 + marker_width + 8.0;
                    cursor += self.runs_block(x + indent, cursor, width - indent, segment, style);
                    cursor += bullet_gap;
                }
            }
        }
        cursor - y
    }

    /// Lays out one segment's styled runs and pushes an element per run.
    fn runs_block(&mut self, x: f32, y: f32, width: f32, segment: &Segment, style: &TextStyle) -> f32 {
        let lines = self.measurer().layout_spans(&segment.spans, style, width);
        for (i, line) in lines.iter().enumerate() {
            let line_y = y + i as f32 * style.line_height;
            for run in line {
                self.push_run(x, line_y, run, style);
            }
        }
        lines.len() as f32 * style.line_height
    }

    fn push_run(&mut self, x: f32, y: f32, run: &StyledRun, style: &TextStyle) {
        let run_style = if run.bold { bolded(style) } else { style.clone() };
        let rect = Rect::new(x + run.x, y, run.width, run_style.line_height);
        self.scene.push(
            rect,
            Element::Text(TextElement { content: run.text.clone(), style: run_style }),
        );
    }

    /// Like [`Self::segments`] for a single line of spans, but bold runs
    /// take `accent` as their color (the "soussigné" pattern where the
    /// organisation name is emphasized in the primary color).
    pub fn spans_accented(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        spans: &[papier_markup::Span],
        style: &TextStyle,
        accent: Color,
    ) -> f32 {
        let lines = self.measurer().layout_spans(spans, style, width);
        for (i, line) in lines.iter().enumerate() {
            let line_y = y + i as f32 * style.line_height;
            for run in line {
                let run_style = if run.bold {
                    bolded(style).color(accent)
                } else {
                    style.clone()
                };
                let rect = Rect::new(x + run.x, line_y, run.width, run_style.line_height);
                self.scene.push(
                    rect,
                    Element::Text(TextElement { content: run.text.clone(), style: run_style }),
                );
            }
        }
        lines.len() as f32 * style.line_height
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

/// Shorthand the templates use for emphasized styles.
pub(crate) trait TextStyleExt {
    fn bold(self) -> Self;
    fn color(self, color: Color) -> Self;
    fn faded(self) -> Self;
}

impl TextStyleExt for TextStyle {
    fn bold(self) -> Self {
        self.weight(FontWeight::Bold)
    }

    fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// The templates' `opacity-60`-ish secondary text.
    fn faded(mut self) -> Self {
        self.color = self.color.with_alpha(0.6);
        self
    }
}

/// Centered multi-line helper used by page footers.
pub(crate) fn centered(style: TextStyle) -> TextStyle {
    style.align(TextAlign::Center)
}

/// The field's text, or its template placeholder when empty. Whitespace
/// counts as content: a block of blank lines suppresses the placeholder
/// and reaches the renderer's own empty-state row instead.
pub(crate) fn text_or<'a>(data: &'a DocumentData, id: &str, fallback: &'a str) -> &'a str {
    let value = data.text(id);
    if value.is_empty() { fallback } else { value }
}
