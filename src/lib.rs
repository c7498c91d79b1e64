//! `piecetext` - Text document engine for editors
//!
//! A piece-table buffer with a line index, an LRU cache of shaped lines keyed
//! by content hash, and an incremental syntax lexer that only rescans what an
//! edit can affect.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (memory-mapped sources)
#![allow(clippy::cast_possible_truncation)] // Intentional offset casts
#![allow(clippy::cast_sign_loss)] // Intentional line delta conversions
#![allow(clippy::cast_possible_wrap)] // Intentional line delta conversions
#![allow(clippy::module_name_repetitions)] // Allow cache::CacheStats etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod cache;
pub mod color;
pub mod decoration;
pub mod engine;
pub mod error;
pub mod event;
pub mod highlight;
pub mod style;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Bound, Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use style::{Style, TextAttributes};

// Re-export the pipeline
pub use engine::{EngineOptions, TextEngine};
pub use text::{ByteSource, Document, EditSummary, FileSource, LineIndex, LineSource, PieceTable};

// Re-export caching and highlighting types
pub use cache::{CacheStats, ShapedLineCache, fnv1a64};
pub use decoration::{DecorationSource, LineDecoration, StyledSpan};
pub use highlight::{IncrementalLexer, LanguageDef, LineState, SyntaxTheme, TokenKind, Tokenizer};
pub use unicode::WidthMethod;
