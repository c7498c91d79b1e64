//! Token types produced by the line scanner.

use std::ops::Range;

/// Semantic token categories.
///
/// Plain identifiers and punctuation are not tokenized; gaps between tokens
/// take the caller's default style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    #[default]
    Plain,
    Keyword,
    Type,
    StringLiteral,
    CharLiteral,
    Number,
    Comment,
    Preprocessor,
}

impl TokenKind {
    /// Number of variants.
    pub const COUNT: usize = 8;

    /// All kinds in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Plain,
        Self::Keyword,
        Self::Type,
        Self::StringLiteral,
        Self::CharLiteral,
        Self::Number,
        Self::Comment,
        Self::Preprocessor,
    ];

    /// Stable index for table lookups.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

/// A byte range within one line tagged with its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "token range must be start <= end");
        Self { kind, start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}
