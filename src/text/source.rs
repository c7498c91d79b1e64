//! Byte sources a [`PieceTable`](super::PieceTable) is initialised from.
//!
//! The original buffer of a piece table is never written to, so it can be
//! an owned byte vector, a slice borrowed from the caller, or a read-only
//! memory map of a file. A [`ByteSource`] hides which one it is.

use crate::event::{LogLevel, emit_log_with};
use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Encoding detected for a byte source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 (BOM present or non-ASCII bytes seen).
    #[default]
    Utf8,
    /// Only 7-bit bytes in the sampled prefix.
    Ascii,
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const SNIFF_LEN: usize = 8192;

/// Guess the encoding from a BOM or from the first 8 KiB.
#[must_use]
pub fn detect_encoding(data: &[u8]) -> Encoding {
    if data.starts_with(&UTF8_BOM) {
        return Encoding::Utf8;
    }
    let sample = &data[..data.len().min(SNIFF_LEN)];
    if sample.is_ascii() {
        Encoding::Ascii
    } else {
        Encoding::Utf8
    }
}

/// Map `file` read-only.
///
/// Returns `Ok(None)` for an empty file, which has nothing to map.
fn map_file(file: &File) -> io::Result<Option<Mmap>> {
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    // SAFETY: the map is only read through `&[u8]`; truncating the file
    // while it is open is outside what the engine supports.
    #[allow(unsafe_code)]
    let map = unsafe { Mmap::map(file)? };
    Ok(Some(map))
}

#[derive(Debug)]
enum Repr<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a [u8]),
    Mapped(Mmap),
}

/// Immutable bytes backing the original buffer of a piece table.
#[derive(Debug)]
pub struct ByteSource<'a> {
    repr: Repr<'a>,
    start: usize,
}

impl<'a> ByteSource<'a> {
    /// Take ownership of `bytes`.
    #[must_use]
    pub fn owned(bytes: Vec<u8>) -> Self {
        Self {
            repr: Repr::Owned(bytes),
            start: 0,
        }
    }

    /// Borrow `bytes`; they must outlive the buffer built from them.
    #[must_use]
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self {
            repr: Repr::Borrowed(bytes),
            start: 0,
        }
    }

    /// Wrap an existing memory map.
    #[must_use]
    pub fn mapped(map: Mmap) -> Self {
        Self {
            repr: Repr::Mapped(map),
            start: 0,
        }
    }

    /// The visible bytes (after any stripped BOM).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        let all = match &self.repr {
            Repr::Owned(bytes) => bytes.as_slice(),
            Repr::Borrowed(bytes) => bytes,
            Repr::Mapped(map) => map.as_ref(),
        };
        &all[self.start..]
    }

    /// Visible length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True when there are no visible bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when backed by a memory map.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        matches!(self.repr, Repr::Mapped(_))
    }

    /// Hide a leading UTF-8 BOM and report the detected encoding.
    ///
    /// Returns the source and whether a BOM was stripped.
    #[must_use]
    pub fn strip_bom(mut self) -> (Self, Encoding, bool) {
        let encoding = detect_encoding(self.as_bytes());
        if self.as_bytes().starts_with(&UTF8_BOM) {
            self.start += UTF8_BOM.len();
            (self, encoding, true)
        } else {
            (self, encoding, false)
        }
    }
}

impl Default for ByteSource<'_> {
    fn default() -> Self {
        Self::owned(Vec::new())
    }
}

impl From<Vec<u8>> for ByteSource<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::owned(bytes)
    }
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::borrowed(bytes)
    }
}

/// A file opened for editing: its bytes (BOM stripped) and detected encoding.
#[derive(Debug)]
pub struct FileSource {
    pub bytes: ByteSource<'static>,
    pub encoding: Encoding,
    pub had_bom: bool,
}

impl FileSource {
    /// Open `path`, memory-mapping it when possible and reading it otherwise.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let bytes = match map_file(&file) {
            Ok(Some(map)) => ByteSource::mapped(map),
            Ok(None) => ByteSource::default(),
            Err(err) => {
                emit_log_with(LogLevel::Warn, || {
                    format!("mmap of {} failed ({err}), reading instead", path.display())
                });
                ByteSource::owned(std::fs::read(path)?)
            }
        };
        let (bytes, encoding, had_bom) = bytes.strip_bom();
        emit_log_with(LogLevel::Info, || {
            format!(
                "opened {}: {} bytes, {encoding:?}, bom={had_bom}",
                path.display(),
                bytes.len()
            )
        });
        Ok(Self {
            bytes,
            encoding,
            had_bom,
        })
    }
}
