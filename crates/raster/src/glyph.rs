//! Glyph outline rasterization: flatten to line segments, then a
//! non-zero-winding scanline fill with 4x vertical supersampling.

use crate::pixmap::Pixmap;
use papier_types::Color;
use ttf_parser::OutlineBuilder;

const QUAD_STEPS: usize = 8;
const CUBIC_STEPS: usize = 16;
const SUBSAMPLES: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Segment {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

/// Collects a glyph outline as flattened device-space line segments.
///
/// Font units are y-up; the sink flips to the pixmap's y-down space while
/// applying the scale and pen offset, so the consumer only ever sees device
/// pixels.
pub struct OutlineSink {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    start: (f32, f32),
    current: (f32, f32),
    segments: Vec<Segment>,
}

impl OutlineSink {
    /// `offset` is the pen position at the baseline; `scale` maps font
    /// units to device pixels.
    pub fn new(scale: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
            start: (0.0, 0.0),
            current: (0.0, 0.0),
            segments: Vec::new(),
        }
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y - y * self.scale)
    }

    fn push_line(&mut self, to: (f32, f32)) {
        let (x0, y0) = self.current;
        let (x1, y1) = to;
        if y0 != y1 {
            self.segments.push(Segment { x0, y0, x1, y1 });
        }
        self.current = to;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Composites the collected outline onto the pixmap.
    pub fn fill(self, pixmap: &mut Pixmap, color: Color) {
        if self.segments.is_empty() {
            return;
        }

        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for s in &self.segments {
            min_x = min_x.min(s.x0).min(s.x1);
            max_x = max_x.max(s.x0).max(s.x1);
            min_y = min_y.min(s.y0).min(s.y1);
            max_y = max_y.max(s.y0).max(s.y1);
        }

        let left = min_x.floor().max(0.0) as i64;
        let right = (max_x.ceil() as i64).min(pixmap.width() as i64);
        let top = min_y.floor().max(0.0) as i64;
        let bottom = (max_y.ceil() as i64).min(pixmap.height() as i64);
        if right <= left || bottom <= top {
            return;
        }

        let row_width = (right - left) as usize;
        let mut coverage = vec![0.0f32; row_width];
        let mut crossings: Vec<(f32, i32)> = Vec::new();
        let weight = 1.0 / SUBSAMPLES as f32;

        for py in top..bottom {
            coverage.fill(0.0);

            for sub in 0..SUBSAMPLES {
                let sy = py as f32 + (sub as f32 + 0.5) * weight;
                crossings.clear();
                for s in &self.segments {
                    let (top_y, bot_y, dir) = if s.y0 < s.y1 {
                        (s.y0, s.y1, 1)
                    } else {
                        (s.y1, s.y0, -1)
                    };
                    if sy < top_y || sy >= bot_y {
                        continue;
                    }
                    let t = (sy - s.y0) / (s.y1 - s.y0);
                    crossings.push((s.x0 + t * (s.x1 - s.x0), dir));
                }
                if crossings.is_empty() {
                    continue;
                }
                crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

                let mut winding = 0;
                let mut span_start = 0.0f32;
                for &(x, dir) in &crossings {
                    let was_inside = winding != 0;
                    winding += dir;
                    let is_inside = winding != 0;
                    if !was_inside && is_inside {
                        span_start = x;
                    } else if was_inside && !is_inside {
                        accumulate_span(&mut coverage, left as f32, span_start, x, weight);
                    }
                }
            }

            for (i, &cov) in coverage.iter().enumerate() {
                if cov > 0.003 {
                    pixmap.blend((left + i as i64) as u32, py as u32, color, cov.min(1.0));
                }
            }
        }
    }
}

/// Adds `weight`-scaled horizontal coverage of [xa, xb) into the row
/// accumulator starting at pixel `row_left`.
fn accumulate_span(coverage: &mut [f32], row_left: f32, xa: f32, xb: f32, weight: f32) {
    if xb <= xa {
        return;
    }
    let first = (xa - row_left).floor().max(0.0) as usize;
    let last = ((xb - row_left).ceil() as usize).min(coverage.len());
    for (i, slot) in coverage.iter_mut().enumerate().take(last).skip(first) {
        let px0 = row_left + i as f32;
        let overlap = (xb.min(px0 + 1.0) - xa.max(px0)).clamp(0.0, 1.0);
        *slot += overlap * weight;
    }
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.start = p;
        self.current = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.push_line(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (cx, cy) = self.map(x1, y1);
        let (ex, ey) = self.map(x, y);
        let (sx, sy) = self.current;
        for i in 1..=QUAD_STEPS {
            let t = i as f32 / QUAD_STEPS as f32;
            let mt = 1.0 - t;
            let px = mt * mt * sx + 2.0 * mt * t * cx + t * t * ex;
            let py = mt * mt * sy + 2.0 * mt * t * cy + t * t * ey;
            self.push_line((px, py));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1x, c1y) = self.map(x1, y1);
        let (c2x, c2y) = self.map(x2, y2);
        let (ex, ey) = self.map(x, y);
        let (sx, sy) = self.current;
        for i in 1..=CUBIC_STEPS {
            let t = i as f32 / CUBIC_STEPS as f32;
            let mt = 1.0 - t;
            let px = mt * mt * mt * sx
                + 3.0 * mt * mt * t * c1x
                + 3.0 * mt * t * t * c2x
                + t * t * t * ex;
            let py = mt * mt * mt * sy
                + 3.0 * mt * mt * t * c1y
                + 3.0 * mt * t * t * c2y
                + t * t * t * ey;
            self.push_line((px, py));
        }
    }

    fn close(&mut self) {
        let start = self.start;
        self.push_line(start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a filled unit square outline in device space by driving the
    /// sink directly (scale 1, no offset, y pre-flipped).
    fn square(x: f32, y: f32, size: f32) -> OutlineSink {
        let mut sink = OutlineSink::new(1.0, 0.0, 0.0);
        // map() negates y, so feed negated coordinates to land at +y.
        sink.move_to(x, -y);
        sink.line_to(x + size, -y);
        sink.line_to(x + size, -(y + size));
        sink.line_to(x, -(y + size));
        sink.close();
        sink
    }

    #[test]
    fn test_square_fills_interior() {
        let mut pm = Pixmap::white(10, 10);
        square(2.0, 2.0, 6.0).fill(&mut pm, Color::BLACK);
        assert_eq!(pm.get(5, 5), (0, 0, 0, 0xff));
        assert_eq!(pm.get(0, 0), (0xff, 0xff, 0xff, 0xff));
        assert_eq!(pm.get(9, 9), (0xff, 0xff, 0xff, 0xff));
    }

    #[test]
    fn test_fractional_square_antialiases_edges() {
        let mut pm = Pixmap::white(6, 6);
        square(1.5, 1.5, 3.0).fill(&mut pm, Color::BLACK);
        // Interior pixel fully covered.
        assert_eq!(pm.get(3, 3).0, 0);
        // Edge pixel partially covered: neither white nor black.
        let (r, ..) = pm.get(1, 3);
        assert!(r > 20 && r < 235, "edge coverage should be partial, got {}", r);
    }

    #[test]
    fn test_empty_outline_is_noop() {
        let mut pm = Pixmap::white(4, 4);
        let sink = OutlineSink::new(1.0, 0.0, 0.0);
        assert!(sink.is_empty());
        sink.fill(&mut pm, Color::BLACK);
        assert_eq!(pm.get(2, 2), (0xff, 0xff, 0xff, 0xff));
    }
}
