//! Codepoint and grapheme-cluster columns.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over extended grapheme clusters.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Number of codepoints in `s`.
#[must_use]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Number of grapheme clusters in `s`.
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Byte offset of the `char_idx`-th codepoint, clamped to `s.len()`.
#[must_use]
pub fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte, _)| byte)
}

/// Number of codepoints that start before byte offset `byte`.
#[must_use]
pub fn byte_to_char(s: &str, byte: usize) -> usize {
    s.char_indices().take_while(|&(i, _)| i < byte).count()
}

/// Byte offset of the `idx`-th grapheme cluster, clamped to `s.len()`.
#[must_use]
pub fn grapheme_to_byte(s: &str, idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(idx)
        .map_or(s.len(), |(byte, _)| byte)
}

/// Number of grapheme clusters that start before byte offset `byte`.
#[must_use]
pub fn byte_to_grapheme(s: &str, byte: usize) -> usize {
    s.grapheme_indices(true)
        .take_while(|&(i, _)| i < byte)
        .count()
}
