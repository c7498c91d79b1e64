//! The edit pipeline: document, shaped-line cache and decoration sources
//! kept in step on every edit.
//!
//! An edit runs to completion on the calling thread in a fixed order: the
//! piece table mutates, the line index is rebuilt, cached layout for the
//! edited line is dropped and later lines are renumbered, then every
//! decoration source (the syntax lexer first) is told about the edit.
//!
//! # Examples
//!
//! ```
//! use piecetext::{LanguageDef, TextEngine};
//!
//! let mut engine: TextEngine<'_, usize> = TextEngine::from_bytes("int x;\nint y;\n");
//! engine.set_language(LanguageDef::cpp());
//!
//! engine.insert(0, 6, " /*").unwrap();
//! assert_eq!(engine.line(0).unwrap().as_ref(), b"int x; /*");
//!
//! let spans = engine.styled_line(1).unwrap();
//! assert_eq!(spans.len(), 1);
//! assert_eq!((spans[0].start, spans[0].end), (0, 6));
//!
//! let width = *engine.shaped_line(1, |text| text.len()).unwrap();
//! assert_eq!(width, 6);
//! ```

use std::borrow::Cow;
use std::path::Path;

use crate::cache::{CacheStats, DEFAULT_CAPACITY, ShapedLineCache, fnv1a64};
use crate::decoration::{DecorationSource, LineDecoration, StyledSpan, flatten};
use crate::error::{Bound, Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::highlight::{IncrementalLexer, LanguageDef, SyntaxTheme};
use crate::style::Style;
use crate::text::{Document, EditSummary, Encoding, FileSource};

/// Construction-time settings for [`TextEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum number of shaped lines kept.
    pub cache_capacity: usize,
    /// Style for text no decoration covers.
    pub default_style: Style,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            default_style: Style::DEFAULT,
        }
    }
}

/// Text document engine.
///
/// `R` is whatever the host's shaper produces for one line (glyph runs,
/// measured widths); it is only ever created by the closure passed to
/// [`shaped_line`](Self::shaped_line).
///
/// The built-in lexer caches state behind a `RefCell`, so the engine is
/// `Send` but not `Sync`. Hosts sharing it across threads put it behind a
/// `Mutex` and serialize all access.
pub struct TextEngine<'a, R = ()> {
    document: Document<'a>,
    cache: ShapedLineCache<R>,
    lexer: IncrementalLexer,
    sources: Vec<Box<dyn DecorationSource>>,
    options: EngineOptions,
    encoding: Encoding,
}

impl<R> Default for TextEngine<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> TextEngine<'a, R> {
    /// Empty document with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_document(Document::new(), EngineOptions::default())
    }

    /// Engine over an existing document.
    #[must_use]
    pub fn with_document(document: Document<'a>, options: EngineOptions) -> Self {
        Self {
            document,
            cache: ShapedLineCache::with_capacity(options.cache_capacity),
            lexer: IncrementalLexer::new(),
            sources: Vec::new(),
            options,
            encoding: Encoding::default(),
        }
    }

    /// Engine owning `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_document(Document::from_bytes(bytes), EngineOptions::default())
    }

    /// Engine borrowing `bytes` as its original buffer.
    #[must_use]
    pub fn from_borrowed(bytes: &'a [u8]) -> Self {
        Self::with_document(Document::from_borrowed(bytes), EngineOptions::default())
    }

    /// Document being edited.
    #[must_use]
    pub fn document(&self) -> &Document<'a> {
        &self.document
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Encoding detected when the source was opened.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.document.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Bytes of `line`, terminator excluded.
    pub fn line(&self, line: usize) -> Result<Cow<'_, [u8]>> {
        self.document.line(line)
    }

    /// Line text with invalid UTF-8 replaced.
    pub fn line_string(&self, line: usize) -> Result<String> {
        self.document.line_string(line)
    }

    /// Whole text.
    #[must_use]
    pub fn text(&self) -> Vec<u8> {
        self.document.text()
    }

    /// Insert `text` at byte column `col` of `line`.
    pub fn insert(&mut self, line: usize, col: usize, text: impl AsRef<[u8]>) -> Result<EditSummary> {
        let text = text.as_ref();
        let edit = self.document.insert(line, col, text)?;
        emit_log_with(LogLevel::Debug, || {
            format!(
                "insert {} bytes at {line}:{col} ({:+} lines)",
                text.len(),
                edit.line_delta()
            )
        });
        self.propagate_edit(&edit);
        Ok(edit)
    }

    /// Erase `count` bytes starting at byte column `col` of `line`.
    pub fn erase(&mut self, line: usize, col: usize, count: usize) -> Result<EditSummary> {
        let edit = self.document.erase(line, col, count)?;
        emit_log_with(LogLevel::Debug, || {
            format!(
                "erase {count} bytes at {line}:{col} ({:+} lines)",
                edit.line_delta()
            )
        });
        self.propagate_edit(&edit);
        Ok(edit)
    }

    fn propagate_edit(&mut self, edit: &EditSummary) {
        let delta = edit.line_delta();
        self.cache.invalidate(edit.line);
        if delta != 0 {
            let removed = if delta < 0 { delta.unsigned_abs() } else { 0 };
            self.cache.invalidate_range(edit.line + 1, removed, delta);
        }

        self.lexer.on_edit(edit);
        for source in &mut self.sources {
            source.on_edit(edit);
        }
    }

    /// The built-in syntax lexer.
    #[must_use]
    pub fn lexer(&self) -> &IncrementalLexer {
        &self.lexer
    }

    /// Highlight with `lang`.
    pub fn set_language(&mut self, lang: LanguageDef) {
        self.lexer.set_language(lang);
    }

    /// Pick a language from the extension of `path`; false if none matches.
    pub fn detect_language(&mut self, path: &Path) -> bool {
        self.lexer.detect_language(path)
    }

    pub fn set_theme(&mut self, theme: SyntaxTheme) {
        self.lexer.set_theme(theme);
    }

    /// Register an extra decoration source, replacing one with the same name.
    pub fn add_decoration_source(&mut self, source: Box<dyn DecorationSource>) {
        let name = source.name().to_string();
        if let Some(slot) = self.sources.iter_mut().find(|s| s.name() == name) {
            *slot = source;
        } else {
            self.sources.push(source);
        }
        emit_log_with(LogLevel::Debug, || format!("decoration source '{name}' added"));
    }

    /// Remove the extra source called `name`.
    pub fn remove_decoration_source(&mut self, name: &str) -> Option<Box<dyn DecorationSource>> {
        let index = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(index))
    }

    /// Names of the registered extra sources, in registration order.
    pub fn decoration_sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name())
    }

    /// Spans from the lexer and every extra source, priorities offset by
    /// each source's base priority.
    pub fn decorations(&self, line: usize) -> Result<LineDecoration> {
        self.check_line(line)?;
        Ok(collect_decorations(
            &self.document,
            &self.lexer,
            &self.sources,
            line,
        ))
    }

    /// Non-overlapping styled runs covering `line`, merged by priority.
    pub fn styled_line(&self, line: usize) -> Result<Vec<StyledSpan>> {
        let span = self.document.line_span(line)?;
        let deco = collect_decorations(&self.document, &self.lexer, &self.sources, line);
        Ok(flatten(&deco, span.len, self.options.default_style))
    }

    /// Shaped result for `line`, from the cache when the line text is
    /// unchanged, otherwise produced by `shape` and cached.
    pub fn shaped_line<F>(&mut self, line: usize, shape: F) -> Result<&R>
    where
        F: FnOnce(&[u8]) -> R,
    {
        let text = self.document.line(line)?;
        let hash = fnv1a64(&text);
        Ok(self.cache.get_or_insert_with(line, hash, || shape(&text)))
    }

    /// Drop all shaped lines (font, size or DPI change).
    pub fn invalidate_layout(&mut self) {
        emit_log_with(LogLevel::Debug, || {
            format!("layout invalidated ({} shaped lines dropped)", self.cache.len())
        });
        self.cache.clear();
    }

    #[must_use]
    pub fn cache(&self) -> &ShapedLineCache<R> {
        &self.cache
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn check_line(&self, line: usize) -> Result<()> {
        let count = self.document.line_count();
        if line >= count {
            return Err(Error::out_of_range(Bound::Line, line, count));
        }
        Ok(())
    }
}

impl<R> TextEngine<'static, R> {
    /// Open `path` (memory-mapped when possible) and pick a language from
    /// its extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, EngineOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: EngineOptions) -> Result<Self> {
        let path = path.as_ref();
        let source = FileSource::open(path)?;
        let mut engine = Self::with_document(Document::from_source(source.bytes), options);
        engine.encoding = source.encoding;
        engine.lexer.detect_language(path);
        Ok(engine)
    }
}

fn collect_decorations(
    document: &Document<'_>,
    lexer: &IncrementalLexer,
    sources: &[Box<dyn DecorationSource>],
    line: usize,
) -> LineDecoration {
    let mut merged = lexer.decorate(document, line);
    merged.shift_priority(lexer.base_priority());
    for source in sources {
        let mut deco = source.decorate(document, line);
        deco.shift_priority(source.base_priority());
        merged.extend(deco.spans);
    }
    merged
}
