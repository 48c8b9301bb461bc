//! The fixed-size visual tree produced by the template renderers.
//!
//! A `Scene` is the in-memory representation of one physical page after
//! layout: a background color and a flat list of absolutely positioned
//! drawable elements in paint order. It is deliberately backend-agnostic:
//! the same scene feeds the scaled on-screen preview and the unscaled
//! export rasterizer, which is what guarantees the two can never diverge.

use papier_style::{FontStyle, FontWeight, TextAlign};
use papier_types::{Color, Rect, Size};

/// Physical page width in density-independent pixels (A4 at 96 DPI).
pub const PAGE_WIDTH: f32 = 794.0;
/// Physical page height in density-independent pixels (A4 at 96 DPI).
pub const PAGE_HEIGHT: f32 = 1123.0;

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Size,
    pub background: Color,
    pub elements: Vec<PositionedElement>,
}

impl Scene {
    /// An empty A4 page with the given background.
    pub fn page(background: Color) -> Self {
        Self {
            size: Size::new(PAGE_WIDTH, PAGE_HEIGHT),
            background,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, rect: Rect, element: Element) {
        self.elements.push(PositionedElement { rect, element });
    }

    pub fn push_fill(&mut self, rect: Rect, fill: Color) {
        self.push(rect, Element::Rect(RectElement { fill: Some(fill), stroke: None }));
    }

    pub fn push_stroke(&mut self, rect: Rect, color: Color, width: f32) {
        self.push(
            rect,
            Element::Rect(RectElement { fill: None, stroke: Some(Stroke { color, width }) }),
        );
    }

    pub fn push_text(&mut self, rect: Rect, text: impl Into<String>, style: TextStyle) {
        self.push(rect, Element::Text(TextElement { content: text.into(), style }));
    }

    /// Iterates the text elements in paint order (mostly for tests and
    /// debugging dumps).
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|p| match &p.element {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageElement> {
        self.elements.iter().filter_map(|p| match &p.element {
            Element::Image(i) => Some(i),
            _ => None,
        })
    }
}

/// A drawable item with its absolute position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub rect: Rect,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect(RectElement),
    Text(TextElement),
    Image(ImageElement),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A filled and/or stroked rectangle. Thin fills double as rules and
/// divider lines.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// A block of text. The content may contain newlines for pre-wrapped
/// multi-line blocks; the painter advances one line-height per line and
/// applies the horizontal alignment within the element's rect.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    /// Font size in page pixels.
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub color: Color,
    pub align: TextAlign,
    /// Baseline-to-baseline distance in page pixels.
    pub line_height: f32,
}

impl TextStyle {
    pub fn new(family: impl Into<String>, size: f32, color: Color) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            color,
            align: TextAlign::Left,
            // The 1.5 ratio tracks the relaxed leading the templates use.
            line_height: size * 1.5,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }
}

/// How an image is fitted into its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFit {
    /// Scale to fit entirely inside the slot, preserving aspect ratio.
    #[default]
    Contain,
    /// Scale to cover the whole slot, cropping the overflow.
    Cover,
}

/// A referenced image. `src` is resolved through the session's resource
/// provider at paint time; the scene itself never holds pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub src: String,
    pub fit: ImageFit,
    /// Clip to an inscribed circle (the résumé photo slot).
    pub rounded: bool,
}
