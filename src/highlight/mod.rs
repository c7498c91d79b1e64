//! Syntax highlighting: tokens, the C-like line scanner, themes and the
//! incremental lexer that keeps multi-line state in step with edits.

mod incremental;
mod language;
mod scanner;
mod theme;
pub mod token;
pub mod tokenizer;


pub use incremental::IncrementalLexer;
pub use language::LanguageDef;
pub use scanner::CLikeScanner;
pub use theme::SyntaxTheme;
pub use token::{Token, TokenKind};
pub use tokenizer::{LineState, ScanResult, Tokenizer, TokenizerRegistry};
