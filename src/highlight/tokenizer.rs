//! Tokenizer trait, per-line lexical state and the extension registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::token::Token;

/// Lexical state carried from the end of one line into the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LineState {
    #[default]
    Normal,
    InBlockComment,
}

/// Tokens for one line plus the state the next line starts in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub exit_state: LineState,
}

/// Single-line scanner, stateless apart from the entry state it is given.
pub trait Tokenizer: Send + Sync {
    /// Human-readable name of this tokenizer.
    fn name(&self) -> &str;

    /// File extensions this tokenizer handles, without the leading dot.
    fn extensions(&self) -> &[String];

    /// Scan one line (terminator excluded) starting in `entry`.
    fn scan_line(&self, line: &[u8], entry: LineState) -> ScanResult;

    /// Scan a whole text, returning tokens with absolute byte offsets.
    ///
    /// `\r\n`, `\n` and bare `\r` all end a line, matching the line index.
    fn scan(&self, text: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut state = LineState::Normal;
        let mut offset = 0usize;

        loop {
            let rest = &text[offset..];
            let line_len = rest
                .iter()
                .position(|&b| b == b'\n' || b == b'\r')
                .unwrap_or(rest.len());
            let result = self.scan_line(&rest[..line_len], state);
            tokens.extend(result.tokens.into_iter().map(|mut token| {
                token.start += offset;
                token.end += offset;
                token
            }));
            state = result.exit_state;

            offset += line_len;
            match text.get(offset) {
                Some(b'\r') if text.get(offset + 1) == Some(&b'\n') => offset += 2,
                Some(_) => offset += 1,
                None => break,
            }
        }

        tokens
    }
}

/// Registry for tokenizer lookup by extension or name.
#[derive(Default)]
pub struct TokenizerRegistry {
    tokenizers: Vec<Arc<dyn Tokenizer>>,
    by_extension: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl TokenizerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tokenizer. Later registrations override existing lookups.
    pub fn register(&mut self, tokenizer: Arc<dyn Tokenizer>) {
        let index = self.tokenizers.len();
        self.by_name
            .insert(tokenizer.name().to_ascii_lowercase(), index);

        for ext in tokenizer.extensions() {
            let key = ext.trim_start_matches('.').to_ascii_lowercase();
            if !key.is_empty() {
                self.by_extension.insert(key, index);
            }
        }

        self.tokenizers.push(tokenizer);
    }

    /// Number of registered tokenizers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokenizers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokenizers.is_empty()
    }

    /// Tokenizer for a file extension (case-insensitive, with or without dot).
    #[must_use]
    pub fn for_extension(&self, ext: &str) -> Option<Arc<dyn Tokenizer>> {
        let key = ext.trim_start_matches('.').to_ascii_lowercase();
        let index = self.by_extension.get(&key)?;
        self.tokenizers.get(*index).cloned()
    }

    /// Tokenizer for the extension of `path`. Paths without one match nothing.
    #[must_use]
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn Tokenizer>> {
        let ext = path.extension()?.to_str()?;
        self.for_extension(ext)
    }

    /// Tokenizer by name (case-insensitive).
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Arc<dyn Tokenizer>> {
        let index = self.by_name.get(&name.to_ascii_lowercase())?;
        self.tokenizers.get(*index).cloned()
    }

    /// Registry with all built-in tokenizers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::highlight::scanner::CLikeScanner::cpp()));
        registry
    }
}
