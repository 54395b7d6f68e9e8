//! # Text Layout
//!
//! Measurement seam and greedy word wrap.
//!
//! All lengths in the layout engine are millimetres. Font sizes stay in
//! points, so a [`TextMeasure`] implementation is responsible for the
//! conversion.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::style::FontSpec;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Measures rendered text width.
///
/// The layout engine never touches font tables directly; everything goes
/// through this trait so it can run against a deterministic fake.
pub trait TextMeasure {
    /// Width of `text` on a single line, in millimetres.
    fn text_width(&self, text: &str, font: &FontSpec) -> f64;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        (**self).text_width(text, font)
    }
}

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Measured width, trailing spaces excluded.
    pub width: f64,
}

/// Break `text` into lines no wider than `max_width`.
///
/// Greedy: each line takes as many UAX#14 segments as fit. Explicit
/// newlines always end a line. A single word wider than `max_width` is cut
/// between characters. Empty input yields no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    max_width: f64,
    font: &FontSpec,
) -> Vec<BrokenLine> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    let mut current = String::new();
    let mut seg_start = 0;

    for (end, opportunity) in linebreaks(text) {
        let segment = &text[seg_start..end];
        seg_start = end;

        let mandatory = opportunity == BreakOpportunity::Mandatory;
        let segment = if mandatory {
            segment.trim_end_matches(['\n', '\r', '\u{2028}', '\u{2029}', '\u{000B}', '\u{000C}', '\u{0085}'])
        } else {
            segment
        };

        place_segment(measure, &mut current, segment, max_width, font, &mut lines);

        if mandatory {
            push_line(measure, &mut current, font, &mut lines);
        }
    }

    if !current.is_empty() {
        push_line(measure, &mut current, font, &mut lines);
    }

    lines
}

/// Append one break segment to the line being built, flushing lines as
/// needed.
fn place_segment<M: TextMeasure + ?Sized>(
    measure: &M,
    current: &mut String,
    segment: &str,
    max_width: f64,
    font: &FontSpec,
    lines: &mut Vec<BrokenLine>,
) {
    if segment.is_empty() {
        return;
    }

    let candidate = format!("{}{}", current, segment);
    if measure.text_width(candidate.trim_end(), font) <= max_width {
        *current = candidate;
        return;
    }

    if !current.is_empty() {
        push_line(measure, current, font, lines);
    }

    if measure.text_width(segment.trim_end(), font) <= max_width {
        current.push_str(segment);
        return;
    }

    // Word wider than the line: cut between characters.
    for ch in segment.chars() {
        let mut next = current.clone();
        next.push(ch);
        if !current.is_empty() && measure.text_width(next.trim_end(), font) > max_width {
            push_line(measure, current, font, lines);
            current.push(ch);
        } else {
            *current = next;
        }
    }
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
/// Text that already fits comes back unchanged.
///
/// The width of a trimmed prefix never shrinks as the prefix grows, so the
/// cut point is found by binary search over char boundaries.
pub fn ellipsize<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    max_width: f64,
    font: &FontSpec,
) -> String {
    if measure.text_width(text, font) <= max_width {
        return text.to_string();
    }

    let bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let candidate = |chars: usize| format!("{}\u{2026}", text[..bounds[chars]].trim_end());
    let fits = |chars: usize| measure.text_width(&candidate(chars), font) <= max_width;

    if bounds.is_empty() || !fits(0) {
        return String::new();
    }

    // Invariant: a prefix of `lo` chars fits, one of `hi` chars doesn't.
    let (mut lo, mut hi) = (0, bounds.len());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    candidate(lo)
}

fn push_line<M: TextMeasure + ?Sized>(
    measure: &M,
    current: &mut String,
    font: &FontSpec,
    lines: &mut Vec<BrokenLine>,
) {
    let text = current.trim_end().to_string();
    let width = measure.text_width(&text, font);
    lines.push(BrokenLine { text, width });
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    /// Every character is 1mm wide.
    struct Mono;

    impl TextMeasure for Mono {
        fn text_width(&self, text: &str, _font: &FontSpec) -> f64 {
            text.chars().count() as f64
        }
    }

    fn texts(lines: &[BrokenLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    const FONT: FontSpec = FontSpec::regular(10.0);

    #[test]
    fn test_single_line() {
        let lines = wrap_text(&Mono, "Hello", 20.0, &FONT);
        assert_eq!(texts(&lines), vec!["Hello"]);
        assert_eq!(lines[0].width, 5.0);
    }

    #[test]
    fn test_line_break_at_space() {
        let lines = wrap_text(&Mono, "Hello World again", 11.0, &FONT);
        assert_eq!(texts(&lines), vec!["Hello World", "again"]);
    }

    #[test]
    fn test_trailing_space_does_not_count() {
        // "abc def" is 7 wide; the space after "abc" must not push it over
        let lines = wrap_text(&Mono, "abc def", 7.0, &FONT);
        assert_eq!(texts(&lines), vec!["abc def"]);
    }

    #[test]
    fn test_explicit_newline() {
        let lines = wrap_text(&Mono, "Hello\nWorld", 200.0, &FONT);
        assert_eq!(texts(&lines), vec!["Hello", "World"]);
    }

    #[test]
    fn test_blank_line_preserved() {
        let lines = wrap_text(&Mono, "a\n\nb", 200.0, &FONT);
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_string() {
        assert!(wrap_text(&Mono, "", 200.0, &FONT).is_empty());
    }

    #[test]
    fn test_long_word_is_cut() {
        let lines = wrap_text(&Mono, "abcdefghij xy", 4.0, &FONT);
        assert_eq!(texts(&lines), vec!["abcd", "efgh", "ij", "xy"]);
        assert!(lines.iter().all(|l| l.width <= 4.0));
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize(&Mono, "short", 10.0, &FONT), "short");
        assert_eq!(ellipsize(&Mono, "Distributed systems", 8.0, &FONT), "Distrib\u{2026}");
        assert_eq!(ellipsize(&Mono, "abc", 0.5, &FONT), "");
    }

    #[test]
    fn test_ellipsize_keeps_longest_prefix() {
        // trailing space before the cut is dropped
        assert_eq!(ellipsize(&Mono, "ab cdef", 4.0, &FONT), "ab\u{2026}");
        assert_eq!(ellipsize(&Mono, "ab cdef", 5.0, &FONT), "ab c\u{2026}");
        assert_eq!(ellipsize(&Mono, "abcdef", 1.0, &FONT), "\u{2026}");
    }

    /// Counts how many strings were measured.
    struct Counting(std::cell::Cell<usize>);

    impl TextMeasure for Counting {
        fn text_width(&self, text: &str, _font: &FontSpec) -> f64 {
            self.0.set(self.0.get() + 1);
            text.chars().count() as f64
        }
    }

    #[test]
    fn test_ellipsize_huge_label_measures_log_times() {
        let measure = Counting(std::cell::Cell::new(0));
        let label = "x".repeat(64 * 1024);
        let short = ellipsize(&measure, &label, 100.0, &FONT);

        assert_eq!(short.chars().count(), 100);
        assert!(short.ends_with('\u{2026}'));
        // one full measure, one for the empty prefix, then ~17 halvings
        assert!(measure.0.get() <= 24, "measured {} times", measure.0.get());
    }

    #[test]
    fn test_lines_fit_with_real_metrics() {
        let ctx = FontContext::new();
        let text = "Ingénieure logicielle passionnée par les compilateurs, \
                    les systèmes distribués et la performance.";
        let lines = wrap_text(&ctx, text, 60.0, &FONT);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.width <= 60.0, "line too wide: {:?}", line);
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), text);
    }
}
