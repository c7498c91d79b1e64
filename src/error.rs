//! Error types for piecetext.

use std::fmt;
use std::io;

/// Result type alias for piecetext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which coordinate an [`Error::OutOfRange`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// A byte offset into the buffer.
    Offset,
    /// The end of a byte range (`pos + count`).
    Range,
    /// A line number.
    Line,
    /// A byte column within a line.
    Column,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offset => "offset",
            Self::Range => "range end",
            Self::Line => "line",
            Self::Column => "column",
        };
        f.write_str(name)
    }
}

/// Error type for piecetext operations.
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied coordinate exceeds the valid bounds.
    OutOfRange {
        what: Bound,
        value: usize,
        limit: usize,
    },
    /// I/O error while opening a file source.
    Io(io::Error),
}

impl Error {
    pub(crate) fn out_of_range(what: Bound, value: usize, limit: usize) -> Self {
        Self::OutOfRange { what, value, limit }
    }

    /// Returns true for [`Error::OutOfRange`].
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { what, value, limit } => {
                write!(f, "{what} {value} out of range (limit {limit})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::out_of_range(Bound::Line, 7, 3);
        assert_eq!(err.to_string(), "line 7 out of range (limit 3)");

        let err = Error::out_of_range(Bound::Range, 20, 13);
        assert!(err.to_string().contains("range end 20"));
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_out_of_range());
        assert!(std::error::Error::source(&err).is_some());
    }
}
