//! Lightweight rich-text markup for free-text fields.
//!
//! Free-text fields understand exactly two constructs: a leading `- ` or
//! `* ` turns a line into a bullet, and `**bold**` emphasizes a run inside
//! any line. Everything else is literal. Malformed markup never errors; it
//! degrades to plain text, so the parser is safe to run on anything a user
//! can type (including its own plain-text output).

/// A parsed line of a free-text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Paragraph,
    /// A bulleted line; the `- `/`* ` marker is already stripped.
    Bullet,
}

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Span { text: text.to_string(), bold: false }
    }

    fn bold(text: &str) -> Self {
        Span { text: text.to_string(), bold: true }
    }
}

impl Segment {
    /// The segment's text with emphasis markers dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Splits a raw block into non-empty lines and parses each one.
///
/// Returns an empty vector for empty or whitespace-only input; callers
/// supply their own placeholder in that case.
pub fn parse(raw: &str) -> Vec<Segment> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Segment {
    let trimmed = line.trim();
    if let Some(content) = bullet_content(trimmed) {
        Segment { kind: SegmentKind::Bullet, spans: parse_bold(content) }
    } else {
        Segment { kind: SegmentKind::Paragraph, spans: parse_bold(line) }
    }
}

fn bullet_content(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
}

/// Strips a leading bullet marker from a single line, if present.
///
/// Keyword lists (one skill per line) reuse this without going through the
/// full segment model.
pub fn strip_marker(line: &str) -> &str {
    let trimmed = line.trim();
    bullet_content(trimmed).unwrap_or(trimmed)
}

/// Extracts non-overlapping `**bold**` runs; unpaired delimiters stay
/// literal. Only top-level pairs are interpreted; there is no nesting.
fn parse_bold(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) => {
                if open > 0 {
                    spans.push(Span::plain(&rest[..open]));
                }
                // An empty pair (****) carries no text; drop it silently.
                if close > 0 {
                    spans.push(Span::bold(&after_open[..close]));
                }
                rest = &after_open[close + 2..];
            }
            None => break, // unpaired opener: the remainder is literal
        }
    }

    if !rest.is_empty() {
        spans.push(Span::plain(rest));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_segments() {
        assert!(parse("").is_empty());
        assert!(parse("   \n  \n\t").is_empty());
    }

    #[test]
    fn test_bullets_strip_markers() {
        let segments = parse("- a\n- b");
        assert_eq!(segments.len(), 2);
        for (segment, expected) in segments.iter().zip(["a", "b"]) {
            assert_eq!(segment.kind, SegmentKind::Bullet);
            assert_eq!(segment.plain_text(), expected);
        }
    }

    #[test]
    fn test_star_bullets_too() {
        let segments = parse("* premier\nsecond");
        assert_eq!(segments[0].kind, SegmentKind::Bullet);
        assert_eq!(segments[1].kind, SegmentKind::Paragraph);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let segments = parse("un\n\n   \ndeux");
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_bold_run() {
        let segments = parse("**x**");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].spans, vec![Span::bold("x")]);
    }

    #[test]
    fn test_bold_inside_line() {
        let spans = &parse("avant **milieu** après")[0].spans;
        assert_eq!(
            spans,
            &vec![Span::plain("avant "), Span::bold("milieu"), Span::plain(" après")]
        );
    }

    #[test]
    fn test_unpaired_delimiter_stays_literal() {
        let segments = parse("a**b");
        assert_eq!(segments[0].spans, vec![Span::plain("a**b")]);
    }

    #[test]
    fn test_multiple_pairs_do_not_overlap() {
        let spans = &parse("**a** et **b**")[0].spans;
        assert_eq!(
            spans,
            &vec![Span::bold("a"), Span::plain(" et "), Span::bold("b")]
        );
    }

    #[test]
    fn test_idempotent_on_plain_text() {
        let first = parse("ligne simple sans markup");
        let rendered: String = first[0].plain_text();
        let second = parse(&rendered);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bullet_with_bold_content() {
        let segments = parse("- **clé** : valeur");
        assert_eq!(segments[0].kind, SegmentKind::Bullet);
        assert_eq!(segments[0].spans[0], Span::bold("clé"));
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("- Rust"), "Rust");
        assert_eq!(strip_marker("* Go"), "Go");
        assert_eq!(strip_marker("  C++  "), "C++");
    }
}
