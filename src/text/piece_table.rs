//! Piece table text buffer.
//!
//! The logical text is described by an ordered list of [`Piece`]s, each
//! referencing a run of bytes in one of two backing buffers:
//!
//! - the *original* buffer, immutable, loaded once from a [`ByteSource`]
//! - the *added* buffer, append-only, holding every inserted byte
//!
//! Edits only splice the piece list; backing bytes are never moved or
//! copied. Erased bytes stay allocated in the added buffer.

use crate::error::{Bound, Error, Result};
use crate::text::source::ByteSource;
use std::borrow::Cow;

/// Which backing buffer a piece points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Original,
    Added,
}

/// A run of bytes in one backing buffer. Never empty inside a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub source: BufferKind,
    pub offset: usize,
    pub len: usize,
}

/// Result of [`PieceTable::find_piece`].
///
/// `index == piece_count()` means `pos` is at the very end of the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceLocation {
    pub index: usize,
    pub offset_in_piece: usize,
}

/// Mutable byte buffer stored as a piece table.
///
/// # Examples
///
/// ```
/// use piecetext::text::PieceTable;
///
/// let mut table = PieceTable::from_borrowed(b"Hello, World!");
/// table.erase(5, 7).unwrap();
/// assert_eq!(table.text(), b"Hello!");
/// ```
#[derive(Debug, Default)]
pub struct PieceTable<'a> {
    original: ByteSource<'a>,
    added: Vec<u8>,
    pieces: Vec<Piece>,
    total_len: usize,
}

impl<'a> PieceTable<'a> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table over an arbitrary byte source.
    #[must_use]
    pub fn from_source(original: ByteSource<'a>) -> Self {
        let len = original.len();
        let pieces = if len == 0 {
            Vec::new()
        } else {
            vec![Piece {
                source: BufferKind::Original,
                offset: 0,
                len,
            }]
        };
        Self {
            original,
            added: Vec::new(),
            pieces,
            total_len: len,
        }
    }

    /// Create a table that owns its original bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_source(ByteSource::owned(bytes.into()))
    }

    /// Create a table over borrowed original bytes.
    #[must_use]
    pub fn from_borrowed(bytes: &'a [u8]) -> Self {
        Self::from_source(ByteSource::borrowed(bytes))
    }

    /// Logical length in bytes. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.total_len
    }

    /// True when the logical text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// The piece list, in text order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Size of the append-only added buffer (grows on insert, never shrinks).
    #[must_use]
    pub fn added_len(&self) -> usize {
        self.added.len()
    }

    /// Full contents of one backing buffer.
    #[must_use]
    pub fn buffer_bytes(&self, kind: BufferKind) -> &[u8] {
        match kind {
            BufferKind::Original => self.original.as_bytes(),
            BufferKind::Added => &self.added,
        }
    }

    /// Bytes referenced by `piece`.
    #[must_use]
    pub fn piece_bytes(&self, piece: &Piece) -> &[u8] {
        &self.buffer_bytes(piece.source)[piece.offset..piece.offset + piece.len]
    }

    /// Iterate the referenced byte runs in text order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pieces.iter().map(|piece| self.piece_bytes(piece))
    }

    /// Locate the piece containing `pos` by linear scan.
    ///
    /// A position on a boundary between two pieces reports the earlier piece
    /// with `offset_in_piece == piece.len`. Positions past the end report
    /// `index == piece_count()`.
    #[must_use]
    pub fn find_piece(&self, pos: usize) -> PieceLocation {
        let mut start = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if pos <= start + piece.len {
                return PieceLocation {
                    index,
                    offset_in_piece: pos - start,
                };
            }
            start += piece.len;
        }
        PieceLocation {
            index: self.pieces.len(),
            offset_in_piece: 0,
        }
    }

    /// Split piece `index` so that a piece boundary lands at `offset`.
    /// No-op when `offset` is already on an edge.
    fn split_piece(&mut self, index: usize, offset: usize) {
        let piece = self.pieces[index];
        if offset == 0 || offset == piece.len {
            return;
        }
        let right = Piece {
            source: piece.source,
            offset: piece.offset + offset,
            len: piece.len - offset,
        };
        self.pieces[index].len = offset;
        self.pieces.insert(index + 1, right);
    }

    /// Insert `text` at byte position `pos`.
    ///
    /// Fails with `OutOfRange` if `pos > len()`.
    pub fn insert(&mut self, pos: usize, text: impl AsRef<[u8]>) -> Result<()> {
        let text = text.as_ref();
        if pos > self.total_len {
            return Err(Error::out_of_range(Bound::Offset, pos, self.total_len));
        }
        if text.is_empty() {
            return Ok(());
        }

        let piece = Piece {
            source: BufferKind::Added,
            offset: self.added.len(),
            len: text.len(),
        };
        self.added.extend_from_slice(text);

        let PieceLocation {
            index,
            offset_in_piece,
        } = self.find_piece(pos);
        if index == self.pieces.len() {
            self.pieces.push(piece);
        } else if offset_in_piece == 0 {
            self.pieces.insert(index, piece);
        } else {
            // Covers both "end of piece" and "strictly inside".
            self.split_piece(index, offset_in_piece);
            self.pieces.insert(index + 1, piece);
        }

        self.total_len += text.len();
        Ok(())
    }

    /// Erase `count` bytes starting at `pos`.
    ///
    /// Fails with `OutOfRange` if `pos + count > len()`.
    pub fn erase(&mut self, pos: usize, count: usize) -> Result<()> {
        let end = pos
            .checked_add(count)
            .ok_or_else(|| Error::out_of_range(Bound::Range, usize::MAX, self.total_len))?;
        if end > self.total_len {
            return Err(Error::out_of_range(Bound::Range, end, self.total_len));
        }
        if count == 0 {
            return Ok(());
        }

        let PieceLocation {
            mut index,
            offset_in_piece,
        } = self.find_piece(pos);
        if offset_in_piece > 0 {
            self.split_piece(index, offset_in_piece);
            index += 1;
        }

        let mut remaining = count;
        let mut drain_end = index;
        while remaining > 0 && drain_end < self.pieces.len() {
            let piece = &mut self.pieces[drain_end];
            if piece.len <= remaining {
                remaining -= piece.len;
                drain_end += 1;
            } else {
                piece.offset += remaining;
                piece.len -= remaining;
                remaining = 0;
            }
        }
        self.pieces.drain(index..drain_end);

        self.total_len -= count;
        Ok(())
    }

    /// The whole logical text.
    #[must_use]
    pub fn text(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len);
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// `count` bytes starting at `pos`, clamped to the end of the text.
    #[must_use]
    pub fn text_range(&self, pos: usize, count: usize) -> Vec<u8> {
        self.slice(pos, count).into_owned()
    }

    /// Like [`text_range`](Self::text_range) but borrows when the range lies
    /// inside a single piece.
    #[must_use]
    pub fn slice(&self, pos: usize, count: usize) -> Cow<'_, [u8]> {
        if pos >= self.total_len {
            return Cow::Borrowed(&[]);
        }
        let count = count.min(self.total_len - pos);
        if count == 0 {
            return Cow::Borrowed(&[]);
        }

        let PieceLocation {
            mut index,
            mut offset_in_piece,
        } = self.find_piece(pos);
        if offset_in_piece == self.pieces[index].len {
            index += 1;
            offset_in_piece = 0;
        }

        let first = self.piece_bytes(&self.pieces[index]);
        if first.len() - offset_in_piece >= count {
            return Cow::Borrowed(&first[offset_in_piece..offset_in_piece + count]);
        }

        let mut out = Vec::with_capacity(count);
        let mut remaining = count;
        for piece in &self.pieces[index..] {
            if remaining == 0 {
                break;
            }
            let bytes = &self.piece_bytes(piece)[offset_in_piece..];
            let take = bytes.len().min(remaining);
            out.extend_from_slice(&bytes[..take]);
            remaining -= take;
            offset_in_piece = 0;
        }
        Cow::Owned(out)
    }

    /// Byte at `pos`, if any.
    #[must_use]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.slice(pos, 1).first().copied()
    }
}
