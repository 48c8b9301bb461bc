//! Scene painter: walks the visual tree in paint order and composites
//! every element onto the pixmap at the requested oversampling scale.
//!
//! The traversal mirrors the element enum exactly; missing fonts or
//! unfetchable images degrade that element (with a warning) instead of
//! failing the whole surface; export-fatal errors are the pipeline's
//! business, not the painter's.

use crate::glyph::OutlineSink;
use crate::pixmap::Pixmap;
use image::imageops::FilterType;
use papier_layout::FontLibrary;
use papier_scene::{Element, ImageElement, ImageFit, Scene, TextElement};
use papier_style::TextAlign;
use papier_traits::ResourceProvider;
use papier_types::Rect;
use ttf_parser::GlyphId;

pub(crate) struct Painter<'a> {
    pub fonts: &'a FontLibrary,
    pub resources: &'a dyn ResourceProvider,
    /// Device pixels per scene unit (the oversampling factor).
    pub scale: f32,
}

impl Painter<'_> {
    pub fn paint(&self, scene: &Scene, pixmap: &mut Pixmap) {
        // The surface starts opaque white; the page background composites
        // over it, so a translucent background can never produce a
        // transparent export.
        let full = Rect::new(0.0, 0.0, scene.size.width, scene.size.height);
        pixmap.fill_rect(self.device(full), scene.background);

        for positioned in &scene.elements {
            let rect = self.device(positioned.rect);
            match &positioned.element {
                Element::Rect(r) => {
                    if let Some(fill) = r.fill {
                        pixmap.fill_rect(rect, fill);
                    }
                    if let Some(stroke) = r.stroke {
                        pixmap.stroke_rect(rect, stroke.color, stroke.width * self.scale);
                    }
                }
                Element::Text(t) => self.paint_text(pixmap, rect, t),
                Element::Image(i) => self.paint_image(pixmap, rect, i),
            }
        }
    }

    fn device(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x * self.scale,
            rect.y * self.scale,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }

    fn paint_text(&self, pixmap: &mut Pixmap, rect: Rect, text: &TextElement) {
        let style = &text.style;
        let Some(font) = self.fonts.resolve(&style.family, style.weight, style.style) else {
            // resolve() already warned; skip the run but keep painting.
            return;
        };
        let Some(face) = font.as_face() else {
            log::warn!("Font data for '{}' is not a parseable face", style.family);
            return;
        };

        let glyph_scale = style.size * self.scale / face.units_per_em() as f32;
        let ascender = face.ascender() as f32 * glyph_scale;
        let descender = face.descender() as f32 * glyph_scale; // negative
        let line_height = style.line_height * self.scale;

        for (line_index, line) in text.content.split('\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut buffer = rustybuzz::UnicodeBuffer::new();
            buffer.push_str(line);
            buffer.guess_segment_properties();
            let glyphs = rustybuzz::shape(&face, &[], buffer);

            let line_width: f32 = glyphs
                .glyph_positions()
                .iter()
                .map(|p| p.x_advance as f32 * glyph_scale)
                .sum();

            let x0 = match style.align {
                TextAlign::Left | TextAlign::Justify => rect.x,
                TextAlign::Center => rect.x + (rect.width - line_width) / 2.0,
                TextAlign::Right => rect.x + rect.width - line_width,
            };
            let line_top = rect.y + line_index as f32 * line_height;
            let baseline = line_top + (line_height - (ascender - descender)) / 2.0 + ascender;

            let mut pen_x = x0;
            for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
                let glyph_x = pen_x + pos.x_offset as f32 * glyph_scale;
                let glyph_y = baseline - pos.y_offset as f32 * glyph_scale;
                let mut sink = OutlineSink::new(glyph_scale, glyph_x, glyph_y);
                if face
                    .outline_glyph(GlyphId(info.glyph_id as u16), &mut sink)
                    .is_some()
                    && !sink.is_empty()
                {
                    sink.fill(pixmap, style.color);
                }
                pen_x += pos.x_advance as f32 * glyph_scale;
            }
        }
    }

    fn paint_image(&self, pixmap: &mut Pixmap, rect: Rect, element: &ImageElement) {
        let bytes = match self.resources.load(&element.src) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Image '{}' could not be fetched, skipping: {}", element.src, e);
                return;
            }
        };
        let decoded = match image::load_from_memory(&bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::warn!("Image '{}' could not be decoded, skipping: {}", element.src, e);
                return;
            }
        };

        let (iw, ih) = (decoded.width() as f32, decoded.height() as f32);
        if iw == 0.0 || ih == 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }

        let fit_scale = match element.fit {
            ImageFit::Contain => (rect.width / iw).min(rect.height / ih),
            ImageFit::Cover => (rect.width / iw).max(rect.height / ih),
        };
        let scaled_w = (iw * fit_scale).round().max(1.0) as u32;
        let scaled_h = (ih * fit_scale).round().max(1.0) as u32;
        let resized = image::imageops::resize(&decoded, scaled_w, scaled_h, FilterType::Triangle);

        // Centered placement; Cover overflows the slot and is clipped below.
        let origin_x = rect.x + (rect.width - scaled_w as f32) / 2.0;
        let origin_y = rect.y + (rect.height - scaled_h as f32) / 2.0;

        let radius = rect.width.min(rect.height) / 2.0;
        let (cx, cy) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);

        let x_start = rect.x.max(0.0).floor() as i64;
        let x_end = rect.right().min(pixmap.width() as f32).ceil() as i64;
        let y_start = rect.y.max(0.0).floor() as i64;
        let y_end = rect.bottom().min(pixmap.height() as f32).ceil() as i64;

        for py in y_start..y_end {
            for px in x_start..x_end {
                let sample_x = px as f32 + 0.5 - origin_x;
                let sample_y = py as f32 + 0.5 - origin_y;
                if sample_x < 0.0 || sample_y < 0.0 {
                    continue;
                }
                let (sx, sy) = (sample_x as u32, sample_y as u32);
                if sx >= scaled_w || sy >= scaled_h {
                    continue;
                }

                let mut coverage = 1.0;
                if element.rounded {
                    let dx = px as f32 + 0.5 - cx;
                    let dy = py as f32 + 0.5 - cy;
                    coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
                    if coverage == 0.0 {
                        continue;
                    }
                }

                let pixel = resized.get_pixel(sx, sy).0;
                let color = papier_types::Color {
                    r: pixel[0],
                    g: pixel[1],
                    b: pixel[2],
                    a: pixel[3] as f32 / 255.0,
                };
                pixmap.blend(px as u32, py as u32, color, coverage);
            }
        }
    }
}
