//! E2E tests for the edit → highlight → compose pipeline.
//!
//! Run with:
//!   cargo test --test `highlight_e2e` -- --nocapture
//!
//! CI: runs under the default `cargo test` job.

use std::fmt::Write;
use std::path::Path;
use std::time::Instant;

use piecetext::highlight::{Token, TokenKind};
use piecetext::{LogLevel, SyntaxTheme, TextEngine, clear_log_callback, set_log_callback};
use tracing::{Level, debug, info, span};

const SAMPLE_CPP: &str = include_str!("fixtures/sample.cpp");

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Route the crate's log records into `tracing`.
fn forward_crate_logs() {
    set_log_callback(|level, message| match level {
        LogLevel::Debug => debug!(target: "piecetext", "{message}"),
        _ => info!(target: "piecetext", ?level, "{message}"),
    });
}

fn assert_tokens_well_formed(tokens: &[Token], line_len: usize) {
    let mut last_end = 0usize;
    for token in tokens {
        assert!(token.start < token.end, "token has empty or inverted span");
        assert!(token.end <= line_len, "token exceeds line length");
        assert!(token.start >= last_end, "token overlaps previous token");
        last_end = token.end;
    }
}

fn cpp_engine(source: &str) -> TextEngine<'static> {
    let mut engine = TextEngine::from_bytes(source);
    assert!(engine.detect_language(Path::new("sample.cpp")));
    engine
}

#[test]
fn e2e_cpp_file_highlighting() {
    init_logging();
    let span = span!(Level::INFO, "e2e_cpp_file");
    let _enter = span.enter();

    let engine = cpp_engine(SAMPLE_CPP);
    let lexer = engine.lexer();
    info!(lines = engine.line_count(), "Highlighting fixture");

    for line in 0..engine.line_count() {
        let text = engine.line(line).unwrap();
        let tokens = lexer.tokens(engine.document(), line);
        debug!(line, token_count = tokens.len(), "Line tokenized");
        assert_tokens_well_formed(&tokens, text.len());
    }

    let kinds = |line: usize| -> Vec<TokenKind> {
        lexer
            .tokens(engine.document(), line)
            .iter()
            .map(|t| t.kind)
            .collect()
    };
    assert_eq!(kinds(0), vec![TokenKind::Preprocessor]);
    // Lines 5..=8 are one block comment.
    for line in 5..=8 {
        assert_eq!(kinds(line), vec![TokenKind::Comment], "line {line}");
    }
    assert_eq!(kinds(9), vec![TokenKind::Keyword]);
    assert!(kinds(18).starts_with(&[TokenKind::Keyword, TokenKind::Type]));
    assert!(kinds(32).contains(&TokenKind::CharLiteral));
    assert!(kinds(32).contains(&TokenKind::StringLiteral));
    assert!(kinds(38).contains(&TokenKind::Number));
}

#[test]
fn e2e_edit_reopens_and_closes_comment() {
    init_logging();
    forward_crate_logs();

    let mut engine = cpp_engine(SAMPLE_CPP);
    let last = engine.line_count() - 1;
    let comment_fg = engine.lexer().theme().style_for(TokenKind::Comment).fg;

    // Warm every line, then open a comment before `struct Ring`.
    let trailing = engine.decorations(last).unwrap();
    assert!(trailing.is_empty(), "fixture ends with a newline");
    let start = Instant::now();
    engine.insert(11, 0, "/* ").unwrap();
    let styled = engine.styled_line(12).unwrap();
    info!(elapsed = ?start.elapsed(), "Reopened comment");
    assert_eq!(styled.len(), 1);
    assert_eq!(styled[0].style.fg, comment_fg);

    // The comment now ends at the `*/` of line 23; line 24 is code again.
    let kinds = |engine: &TextEngine<'_>, line: usize| -> Vec<TokenKind> {
        engine
            .lexer()
            .tokens(engine.document(), line)
            .iter()
            .map(|t| t.kind)
            .collect()
    };
    assert_eq!(kinds(&engine, 23), vec![TokenKind::Comment]);
    assert_eq!(kinds(&engine, 24), vec![TokenKind::Number]);

    // Remove it again.
    engine.erase(11, 0, 3).unwrap();
    assert_eq!(engine.line(11).unwrap().as_ref(), b"struct Ring {");
    assert_eq!(kinds(&engine, 11), vec![TokenKind::Keyword]);
    assert_eq!(kinds(&engine, 12).first(), Some(&TokenKind::Type));
    clear_log_callback();
}

#[test]
fn e2e_theme_switching() {
    init_logging();
    info!("Testing theme switching");

    let mut engine = cpp_engine("return 0;");
    let dark = engine.styled_line(0).unwrap();
    engine.set_theme(SyntaxTheme::light());
    let light = engine.styled_line(0).unwrap();

    info!(?dark, ?light, "Theme styles captured");
    assert_eq!(dark.len(), light.len());
    assert_ne!(dark[0].style, light[0].style, "Theme switch should change styles");
}

#[test]
fn e2e_large_document_edit_stays_local() {
    init_logging();

    let mut source = String::with_capacity(32 * 2000);
    for i in 0..2000 {
        let _ = writeln!(&mut source, "int func_{i}() {{ return {i}; }}");
    }
    let mut engine = cpp_engine(&source);
    let last = engine.line_count() - 1;

    let start = Instant::now();
    let trailing = engine.decorations(last).unwrap();
    info!(elapsed = ?start.elapsed(), lines = 2000, "Initial highlight");
    assert!(trailing.is_empty());
    assert_eq!(engine.lexer().valid_up_to(), last);

    // An edit that does not change the exit state re-validates the whole
    // document after scanning a single line.
    engine.insert(1000, 0, "  ").unwrap();
    assert_eq!(engine.lexer().valid_up_to(), 1000);
    let after = engine.decorations(1001).unwrap();
    assert_eq!(after.len(), 3, "int, return and the literal");
    assert_eq!(engine.lexer().valid_up_to(), last);
}

#[test]
fn e2e_malformed_input_handling() {
    init_logging();
    info!("Testing malformed input handling");

    let malformed_inputs = [
        "int main() { /* unterminated comment",
        "auto s = \"unterminated string",
        "int x = 0x",
        "char c = '",
        "#",
        "\u{fffd}\u{0}\u{7f} 1e+",
    ];

    for input in malformed_inputs {
        let engine = cpp_engine(input);
        let tokens = engine.lexer().tokens(engine.document(), 0);
        debug!(input, ?tokens, "Tokens for malformed input");
        assert_tokens_well_formed(&tokens, input.len());

        let spans = engine.styled_line(0).unwrap();
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(input.len()));
    }
}
