//! Flattening of overlapping spans into one non-overlapping run list.

use crate::decoration::span::{LineDecoration, StyledSpan};
use crate::style::{Style, TextAttributes};

/// Merge `deco` into non-overlapping spans covering `0..line_len`.
///
/// Spans are clamped to the line and empty ones ignored. For each interval
/// between span boundaries:
///
/// - foreground, bold and italic come from the highest-priority covering span
/// - background comes from the highest-priority covering span whose
///   background is visible
/// - the interval is underlined if any covering span is, in the colour of
///   the highest-priority underlined span
///
/// Uncovered intervals get `default_style`. An empty line yields no spans.
#[must_use]
pub fn flatten(deco: &LineDecoration, line_len: usize, default_style: Style) -> Vec<StyledSpan> {
    if line_len == 0 {
        return Vec::new();
    }

    let valid: Vec<StyledSpan> = deco
        .iter()
        .map(|span| StyledSpan {
            end: span.end.min(line_len),
            ..*span
        })
        .filter(|span| span.start < span.end)
        .collect();

    if valid.is_empty() {
        return vec![StyledSpan::new(0, line_len, default_style)];
    }

    let mut boundaries = Vec::with_capacity(valid.len() * 2 + 2);
    boundaries.push(0);
    boundaries.push(line_len);
    for span in &valid {
        boundaries.push(span.start);
        boundaries.push(span.end);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    boundaries
        .windows(2)
        .map(|pair| composite(&valid, pair[0], pair[1], default_style))
        .collect()
}

fn composite(spans: &[StyledSpan], start: usize, end: usize, default_style: Style) -> StyledSpan {
    let mut style = default_style;
    let mut best: Option<i32> = None;
    let mut best_bg: Option<i32> = None;
    let mut best_underline: Option<i32> = None;

    for span in spans.iter().filter(|s| s.start <= start && s.end >= end) {
        let p = span.priority;

        if best.is_none_or(|b| p > b) {
            best = Some(p);
            style.fg = span.style.fg;
            let face = TextAttributes::BOLD | TextAttributes::ITALIC;
            style.attributes = (style.attributes - face) | (span.style.attributes & face);
        }

        if span.style.has_bg() && best_bg.is_none_or(|b| p > b) {
            best_bg = Some(p);
            style.bg = span.style.bg;
        }

        if span.style.is_underlined() && best_underline.is_none_or(|b| p > b) {
            best_underline = Some(p);
            style.underline_color = span.style.underline_color;
        }
    }

    style
        .attributes
        .set(TextAttributes::UNDERLINE, best_underline.is_some());

    StyledSpan {
        start,
        end,
        style,
        priority: best.unwrap_or(0),
    }
}
