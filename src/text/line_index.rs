//! Line boundary index over a [`PieceTable`].
//!
//! Three terminators are recognised: `\r\n` (one boundary), bare `\n`, and a
//! bare `\r` not followed by `\n`. `N` terminators always give `N + 1` lines;
//! the last line has no terminator and ends at the buffer length.

use crate::error::{Bound, Error, Result};
use crate::text::piece_table::PieceTable;

/// Byte range of one line, terminator excluded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineSpan {
    pub offset: usize,
    pub len: usize,
}

impl LineSpan {
    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Start offsets of every line plus a CRLF flag per line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    crlf: Vec<bool>,
    total_len: usize,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self {
            line_starts: vec![0],
            crlf: vec![false],
            total_len: 0,
        }
    }
}

impl LineIndex {
    /// Index for an empty buffer (one empty line).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index for `table`.
    #[must_use]
    pub fn build(table: &PieceTable<'_>) -> Self {
        let mut index = Self::new();
        index.rebuild(table);
        index
    }

    /// Recompute all line boundaries from scratch.
    ///
    /// The previous byte is carried across piece boundaries so a `\r\n`
    /// split over two pieces is still one terminator.
    pub fn rebuild(&mut self, table: &PieceTable<'_>) {
        self.line_starts.clear();
        self.crlf.clear();
        self.line_starts.push(0);
        self.total_len = table.len();

        let mut prev = 0u8;
        let mut base = 0usize;
        for chunk in table.chunks() {
            for (i, &byte) in chunk.iter().enumerate() {
                match byte {
                    b'\n' if prev == b'\r' => {
                        // The `\r` already opened a line; move its start past the `\n`.
                        if let Some(start) = self.line_starts.last_mut() {
                            *start = base + i + 1;
                        }
                        if let Some(flag) = self.crlf.last_mut() {
                            *flag = true;
                        }
                    }
                    b'\n' | b'\r' => {
                        self.crlf.push(false);
                        self.line_starts.push(base + i + 1);
                    }
                    _ => {}
                }
                prev = byte;
            }
            base += chunk.len();
        }
        // Last line has no terminator.
        self.crlf.push(false);
    }

    /// Number of lines (always at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Buffer length the index was built for.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    fn check_line(&self, line: usize) -> Result<()> {
        if line >= self.line_starts.len() {
            return Err(Error::out_of_range(
                Bound::Line,
                line,
                self.line_starts.len(),
            ));
        }
        Ok(())
    }

    /// Start offset of `line`.
    pub fn line_start(&self, line: usize) -> Result<usize> {
        self.check_line(line)?;
        Ok(self.line_starts[line])
    }

    /// True if `line` is terminated by `\r\n`.
    pub fn has_crlf(&self, line: usize) -> Result<bool> {
        self.check_line(line)?;
        Ok(self.crlf[line])
    }

    /// Offset and length of `line`, terminator excluded.
    pub fn line_span(&self, line: usize) -> Result<LineSpan> {
        self.check_line(line)?;
        let offset = self.line_starts[line];
        let end = match self.line_starts.get(line + 1) {
            Some(&next) => next - if self.crlf[line] { 2 } else { 1 },
            None => self.total_len,
        };
        Ok(LineSpan {
            offset,
            len: end - offset,
        })
    }

    /// Absolute byte offset of `(line, col)`; `col` may equal the line length.
    pub fn to_offset(&self, line: usize, col: usize) -> Result<usize> {
        let span = self.line_span(line)?;
        if col > span.len {
            return Err(Error::out_of_range(Bound::Column, col, span.len));
        }
        Ok(span.offset + col)
    }

    /// Line containing byte `offset`. Offsets inside a terminator belong to
    /// the line it terminates; offsets past the end clamp to the last line.
    #[must_use]
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_for(text: &str) -> (PieceTable<'static>, LineIndex) {
        let table = PieceTable::from_bytes(text);
        let index = LineIndex::build(&table);
        (table, index)
    }

    fn line_text(table: &PieceTable<'_>, index: &LineIndex, line: usize) -> String {
        let span = index.line_span(line).unwrap();
        String::from_utf8(table.text_range(span.offset, span.len)).unwrap()
    }

    #[test]
    fn test_single_line_no_newline() {
        let (_, index) = index_for("Hello");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_span(0).unwrap(), LineSpan { offset: 0, len: 5 });
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let (_, index) = index_for("Hello\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_span(0).unwrap(), LineSpan { offset: 0, len: 5 });
        assert_eq!(index.line_span(1).unwrap(), LineSpan { offset: 6, len: 0 });
    }

    #[test]
    fn test_multiple_lines() {
        let (table, index) = index_for("line1\nline2\nline3");
        assert_eq!(index.line_count(), 3);
        assert_eq!(line_text(&table, &index, 0), "line1");
        assert_eq!(line_text(&table, &index, 1), "line2");
        assert_eq!(line_text(&table, &index, 2), "line3");
    }

    #[test]
    fn test_empty_text() {
        let (_, index) = index_for("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_span(0).unwrap().len, 0);
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let (table, index) = index_for("a\r\nbc\r\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(line_text(&table, &index, 0), "a");
        assert!(index.has_crlf(0).unwrap());
        assert_eq!(line_text(&table, &index, 1), "bc");
        assert_eq!(index.line_start(2).unwrap(), 7);
        assert!(!index.has_crlf(2).unwrap());
    }

    #[test]
    fn test_bare_cr_terminates() {
        let (table, index) = index_for("a\rb\nc");
        assert_eq!(index.line_count(), 3);
        assert_eq!(line_text(&table, &index, 0), "a");
        assert_eq!(line_text(&table, &index, 1), "b");
        assert_eq!(line_text(&table, &index, 2), "c");
    }

    #[test]
    fn test_mixed_and_consecutive_terminators() {
        let (table, index) = index_for("\r\r\n\n\r");
        // "\r" | "\r\n" | "\n" | "\r" => 4 terminators, 5 lines, all empty.
        assert_eq!(index.line_count(), 5);
        for line in 0..5 {
            assert_eq!(line_text(&table, &index, line), "");
        }
    }

    #[test]
    fn test_crlf_split_across_pieces() {
        let mut table = PieceTable::from_bytes("ab\r");
        table.insert(3, "\ncd").unwrap();
        assert!(table.piece_count() >= 2);
        let index = LineIndex::build(&table);
        assert_eq!(index.line_count(), 2);
        assert!(index.has_crlf(0).unwrap());
        assert_eq!(line_text(&table, &index, 0), "ab");
        assert_eq!(line_text(&table, &index, 1), "cd");
    }

    #[test]
    fn test_to_offset() {
        let (_, index) = index_for("abc\ndef\nghi");
        assert_eq!(index.to_offset(0, 0).unwrap(), 0);
        assert_eq!(index.to_offset(0, 2).unwrap(), 2);
        assert_eq!(index.to_offset(0, 3).unwrap(), 3);
        assert_eq!(index.to_offset(1, 0).unwrap(), 4);
        assert_eq!(index.to_offset(1, 1).unwrap(), 5);
        assert_eq!(index.to_offset(2, 0).unwrap(), 8);
    }

    #[test]
    fn test_out_of_range() {
        let (_, index) = index_for("abc\r\ndef");
        assert!(index.line_span(2).unwrap_err().is_out_of_range());
        assert!(index.to_offset(0, 4).unwrap_err().is_out_of_range());
        assert!(index.to_offset(5, 0).unwrap_err().is_out_of_range());
        assert!(index.line_start(9).is_err());
    }

    #[test]
    fn test_line_at_offset() {
        let (_, index) = index_for("ab\r\ncd\nef");
        assert_eq!(index.line_at_offset(0), 0);
        assert_eq!(index.line_at_offset(2), 0);
        assert_eq!(index.line_at_offset(3), 0);
        assert_eq!(index.line_at_offset(4), 1);
        assert_eq!(index.line_at_offset(7), 2);
        assert_eq!(index.line_at_offset(100), 2);
    }

    #[test]
    fn test_rebuild_tracks_edits() {
        let mut table = PieceTable::from_bytes("one\ntwo");
        let mut index = LineIndex::build(&table);
        table.insert(3, "\nmiddle").unwrap();
        index.rebuild(&table);
        assert_eq!(index.line_count(), 3);
        assert_eq!(line_text(&table, &index, 1), "middle");
        assert_eq!(index.total_len(), table.len());
    }
}
