//! Hand-written single-line scanner for C-like languages.
//!
//! At each position the scanner tries, in order: line comment, block comment,
//! preprocessor directive (only after leading blanks), string literal,
//! character literal, number, identifier. Anything else is skipped one byte
//! at a time. Plain identifiers produce no token.

use crate::highlight::language::LanguageDef;
use crate::highlight::token::{Token, TokenKind};
use crate::highlight::tokenizer::{LineState, ScanResult, Tokenizer};

/// [`Tokenizer`] driven by a [`LanguageDef`].
#[derive(Clone, Debug)]
pub struct CLikeScanner {
    lang: LanguageDef,
}

impl CLikeScanner {
    #[must_use]
    pub fn new(lang: LanguageDef) -> Self {
        Self { lang }
    }

    /// Scanner for the built-in C/C++ definition.
    #[must_use]
    pub fn cpp() -> Self {
        Self::new(LanguageDef::cpp())
    }

    #[must_use]
    pub fn language(&self) -> &LanguageDef {
        &self.lang
    }

    fn classify_word(&self, word: &[u8]) -> Option<TokenKind> {
        if self.lang.is_keyword(word) {
            Some(TokenKind::Keyword)
        } else if self.lang.is_type(word) {
            Some(TokenKind::Type)
        } else {
            None
        }
    }
}

impl Tokenizer for CLikeScanner {
    fn name(&self) -> &str {
        self.lang.name()
    }

    fn extensions(&self) -> &[String] {
        self.lang.extensions()
    }

    fn scan_line(&self, text: &[u8], entry: LineState) -> ScanResult {
        let len = text.len();
        let line_comment = self.lang.line_comment();
        let block_open = self.lang.block_open();
        let block_close = self.lang.block_close();
        let mut tokens = Vec::new();
        let mut pos = 0;

        if entry == LineState::InBlockComment && !block_close.is_empty() {
            match find_from(text, 0, block_close) {
                Some(at) => {
                    pos = at + block_close.len();
                    tokens.push(Token::new(TokenKind::Comment, 0, pos));
                }
                None => {
                    if len > 0 {
                        tokens.push(Token::new(TokenKind::Comment, 0, len));
                    }
                    return ScanResult {
                        tokens,
                        exit_state: LineState::InBlockComment,
                    };
                }
            }
        }

        while pos < len {
            let rest = &text[pos..];
            let c = text[pos];

            if !line_comment.is_empty() && rest.starts_with(line_comment) {
                tokens.push(Token::new(TokenKind::Comment, pos, len));
                break;
            }

            if !block_open.is_empty() && rest.starts_with(block_open) {
                let body = pos + block_open.len();
                match find_from(text, body, block_close) {
                    Some(at) => {
                        let end = at + block_close.len();
                        tokens.push(Token::new(TokenKind::Comment, pos, end));
                        pos = end;
                        continue;
                    }
                    None => {
                        tokens.push(Token::new(TokenKind::Comment, pos, len));
                        return ScanResult {
                            tokens,
                            exit_state: LineState::InBlockComment,
                        };
                    }
                }
            }

            if self.lang.preprocessor() == Some(c) && is_blank(&text[..pos]) {
                tokens.push(Token::new(TokenKind::Preprocessor, pos, len));
                break;
            }

            if c == b'"' {
                let end = scan_quoted(text, pos, b'"');
                tokens.push(Token::new(TokenKind::StringLiteral, pos, end));
                pos = end;
                continue;
            }

            if c == b'\'' {
                let end = scan_quoted(text, pos, b'\'');
                tokens.push(Token::new(TokenKind::CharLiteral, pos, end));
                pos = end;
                continue;
            }

            if c.is_ascii_digit() || (c == b'.' && text.get(pos + 1).is_some_and(u8::is_ascii_digit))
            {
                let end = scan_number(text, pos);
                tokens.push(Token::new(TokenKind::Number, pos, end));
                pos = end;
                continue;
            }

            if is_ident_start(c) {
                let end = rest
                    .iter()
                    .position(|&b| !is_ident_char(b))
                    .map_or(len, |n| pos + n);
                if let Some(kind) = self.classify_word(&text[pos..end]) {
                    tokens.push(Token::new(kind, pos, end));
                }
                pos = end;
                continue;
            }

            pos += 1;
        }

        ScanResult {
            tokens,
            exit_state: LineState::Normal,
        }
    }
}

fn find_from(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|at| from + at)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == b' ' || b == b'\t')
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// End of a quoted literal opened at `start`. Backslash skips the next byte;
/// an unterminated literal runs to the end of the line.
fn scan_quoted(text: &[u8], start: usize, quote: u8) -> usize {
    let mut pos = start + 1;
    while pos < text.len() {
        match text[pos] {
            b'\\' => pos += 2,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    text.len()
}

fn scan_number(text: &[u8], start: usize) -> usize {
    let len = text.len();
    let at = |i: usize| text.get(i).copied().unwrap_or(0);
    let mut pos = start;

    if at(pos) == b'0' && matches!(at(pos + 1), b'x' | b'X') {
        pos += 2;
        while pos < len && (at(pos).is_ascii_hexdigit() || at(pos) == b'\'') {
            pos += 1;
        }
    } else if at(pos) == b'0' && matches!(at(pos + 1), b'b' | b'B') {
        pos += 2;
        while pos < len && matches!(at(pos), b'0' | b'1' | b'\'') {
            pos += 1;
        }
    } else {
        while pos < len && (at(pos).is_ascii_digit() || at(pos) == b'\'') {
            pos += 1;
        }
        if at(pos) == b'.' {
            pos += 1;
            while pos < len && (at(pos).is_ascii_digit() || at(pos) == b'\'') {
                pos += 1;
            }
        }
        if matches!(at(pos), b'e' | b'E') {
            pos += 1;
            if matches!(at(pos), b'+' | b'-') {
                pos += 1;
            }
            while pos < len && at(pos).is_ascii_digit() {
                pos += 1;
            }
        }
    }

    while pos < len && matches!(at(pos), b'u' | b'U' | b'l' | b'L' | b'f' | b'F') {
        pos += 1;
    }
    pos
}
