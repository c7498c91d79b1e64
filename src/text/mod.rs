//! Text storage: piece table, line index and the document that joins them.
//!
//! Key types:
//!
//! - [`PieceTable`]: byte buffer edited by splicing a list of pieces
//! - [`LineIndex`]: line start offsets with CRLF flags
//! - [`Document`]: both of the above, edited in `(line, column)` coordinates
//! - [`ByteSource`] / [`FileSource`]: where the original bytes come from
//!
//! # Examples
//!
//! ```
//! use piecetext::text::Document;
//!
//! let mut doc = Document::from_bytes("int x;\nint y;\n");
//! doc.insert(0, 6, " /*").unwrap();
//! assert_eq!(doc.line(0).unwrap().as_ref(), b"int x; /*");
//! assert_eq!(doc.line_count(), 3);
//! ```

mod document;
mod line_index;
mod piece_table;
mod source;

pub use document::{Document, EditSummary};
pub use line_index::{LineIndex, LineSpan};
pub use piece_table::{BufferKind, Piece, PieceLocation, PieceTable};
pub use source::{ByteSource, Encoding, FileSource, detect_encoding};

use std::borrow::Cow;

/// Read access to a sequence of lines, terminators excluded.
///
/// Decoration sources read line text through this trait so they work over a
/// [`Document`] or any other line store.
pub trait LineSource {
    /// Number of lines.
    fn line_count(&self) -> usize;

    /// Bytes of `line`, or `None` if out of range.
    fn line_bytes(&self, line: usize) -> Option<Cow<'_, [u8]>>;
}

impl<S: AsRef<str>> LineSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_bytes(&self, line: usize) -> Option<Cow<'_, [u8]>> {
        self.get(line).map(|s| Cow::Borrowed(s.as_ref().as_bytes()))
    }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_bytes(&self, line: usize) -> Option<Cow<'_, [u8]>> {
        self.as_slice().line_bytes(line)
    }
}
