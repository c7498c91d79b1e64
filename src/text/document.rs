//! Piece table plus line index, edited in `(line, column)` coordinates.

use crate::error::Result;
use crate::text::LineSource;
use crate::text::line_index::{LineIndex, LineSpan};
use crate::text::piece_table::PieceTable;
use crate::text::source::ByteSource;
use std::borrow::Cow;

/// What an edit did to the line structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditSummary {
    /// Line the edit started on.
    pub line: usize,
    /// Byte column the edit started at.
    pub col: usize,
    /// Absolute byte offset the edit started at.
    pub offset: usize,
    /// Line count before the edit.
    pub old_line_count: usize,
    /// Line count after the edit.
    pub new_line_count: usize,
}

impl EditSummary {
    /// Lines added (positive) or removed (negative) by the edit.
    #[must_use]
    pub fn line_delta(&self) -> isize {
        self.new_line_count as isize - self.old_line_count as isize
    }
}

/// Editable document: a [`PieceTable`] and the [`LineIndex`] built over it.
///
/// The index is rebuilt after every mutation so it always reflects the
/// current buffer.
#[derive(Debug, Default)]
pub struct Document<'a> {
    table: PieceTable<'a>,
    index: LineIndex,
}

impl<'a> Document<'a> {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document over a byte source.
    #[must_use]
    pub fn from_source(source: ByteSource<'a>) -> Self {
        let table = PieceTable::from_source(source);
        let index = LineIndex::build(&table);
        Self { table, index }
    }

    /// Document owning `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_source(ByteSource::owned(bytes.into()))
    }

    /// Document borrowing `bytes`.
    #[must_use]
    pub fn from_borrowed(bytes: &'a [u8]) -> Self {
        Self::from_source(ByteSource::borrowed(bytes))
    }

    /// The underlying piece table.
    #[must_use]
    pub fn table(&self) -> &PieceTable<'a> {
        &self.table
    }

    /// The current line index.
    #[must_use]
    pub fn index(&self) -> &LineIndex {
        &self.index
    }

    /// Number of lines (at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when the document holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Byte span of `line`, terminator excluded.
    pub fn line_span(&self, line: usize) -> Result<LineSpan> {
        self.index.line_span(line)
    }

    /// Bytes of `line` without its terminator.
    pub fn line(&self, line: usize) -> Result<Cow<'_, [u8]>> {
        let span = self.index.line_span(line)?;
        Ok(self.table.slice(span.offset, span.len))
    }

    /// Line text with invalid UTF-8 replaced.
    pub fn line_string(&self, line: usize) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.line(line)?).into_owned())
    }

    /// Whole text.
    #[must_use]
    pub fn text(&self) -> Vec<u8> {
        self.table.text()
    }

    /// Insert `text` at byte column `col` of `line`.
    pub fn insert(&mut self, line: usize, col: usize, text: impl AsRef<[u8]>) -> Result<EditSummary> {
        let offset = self.index.to_offset(line, col)?;
        let old_line_count = self.index.line_count();
        self.table.insert(offset, text)?;
        self.index.rebuild(&self.table);
        Ok(EditSummary {
            line,
            col,
            offset,
            old_line_count,
            new_line_count: self.index.line_count(),
        })
    }

    /// Erase `count` bytes starting at byte column `col` of `line`.
    ///
    /// The range may run past the end of the line (erasing terminators and
    /// following lines) but not past the end of the buffer.
    pub fn erase(&mut self, line: usize, col: usize, count: usize) -> Result<EditSummary> {
        let offset = self.index.to_offset(line, col)?;
        let old_line_count = self.index.line_count();
        self.table.erase(offset, count)?;
        self.index.rebuild(&self.table);
        Ok(EditSummary {
            line,
            col,
            offset,
            old_line_count,
            new_line_count: self.index.line_count(),
        })
    }
}

impl LineSource for Document<'_> {
    fn line_count(&self) -> usize {
        self.index.line_count()
    }

    fn line_bytes(&self, line: usize) -> Option<Cow<'_, [u8]>> {
        self.line(line).ok()
    }
}
