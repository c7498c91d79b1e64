//! Lazily maintained per-line lexical state.
//!
//! [`IncrementalLexer`] stores the state every line starts in and a
//! watermark `valid_up_to`: entries `0..=valid_up_to` are known to match the
//! current text. Edits lower the watermark to the edited line; queries scan
//! forward from it and stop early once a recomputed exit state agrees with
//! the entry already stored for the next line, provided that line has not
//! been touched since it was computed.
//!
//! Entries are spliced when an edit inserts or removes lines so stored
//! states stay attached to the lines they were computed for.

use std::cell::RefCell;
use std::fmt;
use std::iter;
use std::path::Path;
use std::sync::Arc;

use crate::decoration::{DecorationSource, LineDecoration, StyledSpan};
use crate::event::{LogLevel, emit_log_with};
use crate::highlight::language::LanguageDef;
use crate::highlight::scanner::CLikeScanner;
use crate::highlight::theme::SyntaxTheme;
use crate::highlight::token::Token;
use crate::highlight::tokenizer::{LineState, Tokenizer, TokenizerRegistry};
use crate::text::{EditSummary, LineSource};

#[derive(Debug, Default)]
struct LexState {
    /// `entry[i]` is the state line `i` starts in; sized `line_count + 1`.
    entry: Vec<LineState>,
    valid_up_to: usize,
    /// Highest watermark ever reached, shifted with edits.
    computed_to: usize,
    /// Lines below this were touched by edits not yet rescanned.
    dirty_until: usize,
}

impl LexState {
    fn reset(&mut self) {
        self.entry.clear();
        self.valid_up_to = 0;
        self.computed_to = 0;
        self.dirty_until = 0;
    }
}

/// Syntax decoration source with edit-aware lazy state.
pub struct IncrementalLexer {
    tokenizer: Option<Arc<dyn Tokenizer>>,
    registry: TokenizerRegistry,
    theme: SyntaxTheme,
    state: RefCell<LexState>,
}

impl Default for IncrementalLexer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IncrementalLexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncrementalLexer")
            .field("language", &self.language())
            .field("theme", &self.theme.name())
            .field("valid_up_to", &self.valid_up_to())
            .finish_non_exhaustive()
    }
}

impl IncrementalLexer {
    /// Inactive lexer using the built-in tokenizers for detection.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(TokenizerRegistry::with_builtins())
    }

    /// Inactive lexer that detects languages from `registry`.
    #[must_use]
    pub fn with_registry(registry: TokenizerRegistry) -> Self {
        Self {
            tokenizer: None,
            registry,
            theme: SyntaxTheme::default(),
            state: RefCell::new(LexState::default()),
        }
    }

    /// Lexer already active for `lang`.
    #[must_use]
    pub fn for_language(lang: LanguageDef) -> Self {
        let mut lexer = Self::new();
        lexer.set_language(lang);
        lexer
    }

    #[must_use]
    pub fn with_theme(mut self, theme: SyntaxTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Activate `lang`, discarding all cached state.
    pub fn set_language(&mut self, lang: LanguageDef) {
        self.set_tokenizer(Arc::new(CLikeScanner::new(lang)));
    }

    /// Activate an arbitrary tokenizer, discarding all cached state.
    pub fn set_tokenizer(&mut self, tokenizer: Arc<dyn Tokenizer>) {
        emit_log_with(LogLevel::Info, || {
            format!("syntax: language '{}' selected", tokenizer.name())
        });
        self.tokenizer = Some(tokenizer);
        self.state.get_mut().reset();
    }

    /// Deactivate; [`decorate`](DecorationSource::decorate) returns nothing.
    pub fn clear_language(&mut self) {
        self.tokenizer = None;
        self.state.get_mut().reset();
    }

    /// Pick a tokenizer from the extension of `path`.
    ///
    /// Returns false and deactivates the lexer when nothing matches.
    pub fn detect_language(&mut self, path: &Path) -> bool {
        if let Some(tokenizer) = self.registry.for_path(path) {
            self.set_tokenizer(tokenizer);
            true
        } else {
            emit_log_with(LogLevel::Debug, || {
                format!("syntax: no language for {}", path.display())
            });
            self.clear_language();
            false
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// Name of the active tokenizer.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.tokenizer.as_deref().map(Tokenizer::name)
    }

    #[must_use]
    pub fn theme(&self) -> &SyntaxTheme {
        &self.theme
    }

    /// Replace the theme. Cached states stay valid.
    pub fn set_theme(&mut self, theme: SyntaxTheme) {
        self.theme = theme;
    }

    /// Current watermark.
    #[must_use]
    pub fn valid_up_to(&self) -> usize {
        self.state.borrow().valid_up_to
    }

    /// Entry state of `line` if it is currently known to be valid.
    #[must_use]
    pub fn entry_state(&self, line: usize) -> Option<LineState> {
        let state = self.state.borrow();
        if line == 0 {
            return Some(LineState::Normal);
        }
        if line <= state.valid_up_to {
            state.entry.get(line).copied()
        } else {
            None
        }
    }

    /// Raw tokens for `line`, scanned from its (now valid) entry state.
    ///
    /// Empty when inactive or out of range.
    pub fn tokens(&self, lines: &dyn LineSource, line: usize) -> Vec<Token> {
        let Some(tokenizer) = self.tokenizer.as_deref() else {
            return Vec::new();
        };
        let Some(text) = lines.line_bytes(line) else {
            return Vec::new();
        };
        let entry = self.ensure_states(tokenizer, lines, line);
        tokenizer.scan_line(&text, entry).tokens
    }

    /// Make `entry[line]` valid and return it.
    fn ensure_states(&self, tokenizer: &dyn Tokenizer, lines: &dyn LineSource, line: usize) -> LineState {
        let line_count = lines.line_count();
        let mut guard = self.state.borrow_mut();
        let st = &mut *guard;

        st.entry.resize(line_count + 1, LineState::Normal);
        st.valid_up_to = st.valid_up_to.min(line_count);
        st.computed_to = st.computed_to.min(line_count);

        let from = st.valid_up_to;
        let mut scanned = 0usize;
        let mut changed = false;
        let mut i = st.valid_up_to;
        while i < line && i < line_count {
            let text = lines.line_bytes(i).unwrap_or_default();
            let exit = tokenizer.scan_line(&text, st.entry[i]).exit_state;
            scanned += 1;
            let next = i + 1;
            if next >= st.dirty_until && next < st.computed_to && st.entry[next] == exit {
                // Everything up to the old high-water mark still chains.
                st.valid_up_to = st.computed_to;
                changed = false;
                i = st.computed_to;
                continue;
            }
            changed = st.entry[next] != exit;
            st.entry[next] = exit;
            st.valid_up_to = next;
            i = next;
        }

        // A changed entry we stopped at no longer chains into the stored
        // suffix, so the suffix cannot be trusted after a later edit.
        if changed && st.valid_up_to < st.computed_to {
            st.computed_to = st.valid_up_to;
        }
        st.computed_to = st.computed_to.max(st.valid_up_to);
        if st.dirty_until <= st.valid_up_to {
            st.dirty_until = 0;
        }
        if scanned > 0 {
            emit_log_with(LogLevel::Debug, || {
                format!(
                    "syntax: scanned {scanned} lines from {from}, valid up to {}",
                    st.valid_up_to
                )
            });
        }

        st.entry.get(line).copied().unwrap_or_default()
    }
}

fn shift_line(value: usize, edited: usize, delta: isize) -> usize {
    if value <= edited {
        value
    } else {
        value.saturating_add_signed(delta).max(edited)
    }
}

impl DecorationSource for IncrementalLexer {
    fn name(&self) -> &str {
        "syntax"
    }

    fn decorate(&self, lines: &dyn LineSource, line: usize) -> LineDecoration {
        let mut deco = LineDecoration::new();
        deco.extend(
            self.tokens(lines, line)
                .into_iter()
                .map(|token| StyledSpan::new(token.start, token.end, self.theme.style_for(token.kind))),
        );
        deco
    }

    fn on_edit(&mut self, edit: &EditSummary) {
        if self.tokenizer.is_none() {
            return;
        }
        let st = self.state.get_mut();
        let line = edit.line;
        let delta = edit.line_delta();

        st.valid_up_to = st.valid_up_to.min(line);

        let at = line + 1;
        if at < st.entry.len() {
            if delta > 0 {
                let tail = st.entry.split_off(at);
                st.entry
                    .extend(iter::repeat_n(LineState::Normal, delta.unsigned_abs()));
                st.entry.extend(tail);
            } else if delta < 0 {
                let end = (at + delta.unsigned_abs()).min(st.entry.len());
                st.entry.drain(at..end);
            }
        }

        st.computed_to = shift_line(st.computed_to, line, delta);
        st.dirty_until = shift_line(st.dirty_until, line, delta);
        let touched_end = line + delta.max(0).unsigned_abs() + 1;
        st.dirty_until = st.dirty_until.max(touched_end);
    }
}
