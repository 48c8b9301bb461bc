//! Text measurement, wrapping, and styled-run layout.
//!
//! Widths come from real shaping (rustybuzz) whenever a face resolves; a
//! fixed per-em advance keeps the geometry deterministic when the host has
//! no usable fonts. The same measurements drive preview and export, so a
//! wrapped line can never break differently between the two.

use crate::fonts::FontLibrary;
use papier_markup::Span;
use papier_scene::TextStyle;
use papier_style::FontWeight;

/// Advance used per character when no face is available, in em.
const FALLBACK_ADVANCE_EM: f32 = 0.5;

pub struct TextMeasurer<'a> {
    fonts: &'a FontLibrary,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(fonts: &'a FontLibrary) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &'a FontLibrary {
        self.fonts
    }

    /// The advance width of `text` rendered in `style`, in page pixels.
    pub fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match self.fonts.resolve(&style.family, style.weight, style.style) {
            Some(font) => match font.as_face() {
                Some(face) => {
                    let scale = style.size / face.units_per_em() as f32;
                    let mut buffer = rustybuzz::UnicodeBuffer::new();
                    buffer.push_str(text);
                    buffer.guess_segment_properties();
                    let glyphs = rustybuzz::shape(&face, &[], buffer);
                    glyphs
                        .glyph_positions()
                        .iter()
                        .map(|pos| pos.x_advance as f32 * scale)
                        .sum()
                }
                None => self.fallback_measure(text, style),
            },
            None => self.fallback_measure(text, style),
        }
    }

    fn fallback_measure(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.size * FALLBACK_ADVANCE_EM
    }

    /// Greedy word wrap. Explicit newlines are honored (pre-line
    /// semantics); a word longer than the limit gets a line of its own
    /// rather than being broken mid-word.
    pub fn wrap(&self, text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
        let space_width = self.measure(" ", style);
        let mut lines = Vec::new();

        for raw_line in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0;

            for word in raw_line.split_whitespace() {
                let word_width = self.measure(word, style);
                let needed = if current.is_empty() {
                    word_width
                } else {
                    space_width + word_width
                };

                if !current.is_empty() && current_width + needed > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    current_width += space_width;
                }
                current.push_str(word);
                current_width += word_width;
            }
            lines.push(current);
        }

        // Trailing blank line from a terminal newline is meaningless here.
        while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Lays out emphasis-mixed spans into positioned runs. Each returned
    /// line is a list of runs with x offsets relative to the block origin.
    pub fn layout_spans(
        &self,
        spans: &[Span],
        style: &TextStyle,
        max_width: f32,
    ) -> Vec<Vec<StyledRun>> {
        let words = self.tokenize(spans, style);
        if words.is_empty() {
            return Vec::new();
        }

        let space_width = self.measure(" ", style);
        let bold_space_width = self.measure(" ", &bolded(style));

        let mut lines: Vec<Vec<Word>> = Vec::new();
        let mut current: Vec<Word> = Vec::new();
        let mut current_width = 0.0;

        for word in words {
            let gap = if current.is_empty() {
                0.0
            } else if word.bold {
                bold_space_width
            } else {
                space_width
            };

            if !current.is_empty() && current_width + gap + word.width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
                current_width += word.width;
                current.push(word);
            } else {
                current_width += gap + word.width;
                current.push(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        lines
            .into_iter()
            .map(|line| self.merge_runs(line, space_width, bold_space_width))
            .collect()
    }

    fn tokenize(&self, spans: &[Span], style: &TextStyle) -> Vec<Word> {
        let mut words = Vec::new();
        for span in spans {
            let word_style = if span.bold { bolded(style) } else { style.clone() };
            for word in span.text.split_whitespace() {
                words.push(Word {
                    text: word.to_string(),
                    bold: span.bold,
                    width: self.measure(word, &word_style),
                });
            }
        }
        words
    }

    /// Joins consecutive same-emphasis words of one line into runs with
    /// absolute x offsets.
    fn merge_runs(&self, line: Vec<Word>, space_width: f32, bold_space_width: f32) -> Vec<StyledRun> {
        let mut runs: Vec<StyledRun> = Vec::new();
        let mut x = 0.0;

        for word in line {
            let gap = if x == 0.0 {
                0.0
            } else if word.bold {
                bold_space_width
            } else {
                space_width
            };

            match runs.last_mut() {
                Some(run) if run.bold == word.bold => {
                    run.text.push(' ');
                    run.text.push_str(&word.text);
                    run.width += gap + word.width;
                }
                _ => {
                    runs.push(StyledRun {
                        text: word.text,
                        bold: word.bold,
                        x: x + gap,
                        width: word.width,
                    });
                }
            }
            x += gap + word.width;
        }
        runs
    }
}

struct Word {
    text: String,
    bold: bool,
    width: f32,
}

/// One same-emphasis fragment of a laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    /// Offset from the block's left edge, in page pixels.
    pub x: f32,
    pub width: f32,
}

/// The style a bold run inherits: same face parameters, bold weight.
pub fn bolded(style: &TextStyle) -> TextStyle {
    TextStyle { weight: FontWeight::Bold, ..style.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papier_markup::parse;
    use papier_types::Color;

    fn style(size: f32) -> TextStyle {
        TextStyle::new("Inter", size, Color::BLACK)
    }

    fn measurer_without_fonts() -> FontLibrary {
        FontLibrary::new()
    }

    // With no fonts resolvable every char advances size * 0.5, which makes
    // the wrap geometry exact and host-independent.

    #[test]
    fn test_fallback_measure_is_deterministic() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        assert_eq!(m.measure("abcd", &style(10.0)), 20.0);
        assert_eq!(m.measure("", &style(10.0)), 0.0);
    }

    #[test]
    fn test_wrap_keeps_short_text_on_one_line() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        let lines = m.wrap("un deux", &style(10.0), 200.0);
        assert_eq!(lines, vec!["un deux"]);
    }

    #[test]
    fn test_wrap_breaks_at_word_boundaries() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        // "aaaa" is 20px wide at 10px size; at 45px max two words fit
        // (20 + 5 + 20 = 45) and the third wraps.
        let lines = m.wrap("aaaa aaaa aaaa", &style(10.0), 45.0);
        assert_eq!(lines, vec!["aaaa aaaa", "aaaa"]);
    }

    #[test]
    fn test_wrap_honors_explicit_newlines() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        let lines = m.wrap("12 rue X\n75001 Paris", &style(10.0), 500.0);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        let lines = m.wrap("a incompressible a", &style(10.0), 30.0);
        assert_eq!(lines, vec!["a", "incompressible", "a"]);
    }

    #[test]
    fn test_layout_spans_splits_emphasis_runs() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        let spans = &parse("avant **gras** fin")[0].spans;
        let lines = m.layout_spans(spans, &style(10.0), 1000.0);
        assert_eq!(lines.len(), 1);
        let runs = &lines[0];
        assert_eq!(runs.len(), 3);
        assert!(!runs[0].bold && runs[1].bold && !runs[2].bold);
        // Runs advance monotonically.
        assert!(runs[1].x > runs[0].x);
        assert!(runs[2].x > runs[1].x);
    }

    #[test]
    fn test_layout_spans_empty_input() {
        let fonts = measurer_without_fonts();
        let m = TextMeasurer::new(&fonts);
        assert!(m.layout_spans(&[], &style(10.0), 100.0).is_empty());
    }
}
