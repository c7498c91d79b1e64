//! Fuzz target for edit sequences.
//!
//! Replays arbitrary inserts and erases through the engine and a `Vec<u8>`
//! model. Text, line count, shaped-line cache and lexer must all stay
//! consistent with the model after every edit.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use piecetext::cache::fnv1a64;
use piecetext::highlight::{IncrementalLexer, LanguageDef};
use piecetext::{EngineOptions, TextEngine};

#[derive(Arbitrary, Debug)]
enum Edit {
    Insert { line: u16, col: u16, text: Vec<u8> },
    Erase { line: u16, col: u16, count: u8 },
    Shape { line: u16 },
    Decorate { line: u16 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    initial: Vec<u8>,
    edits: Vec<Edit>,
}

fn terminators(bytes: &[u8]) -> usize {
    let crlf = bytes.windows(2).filter(|w| *w == *b"\r\n").count();
    bytes.iter().filter(|&&b| b == b'\n' || b == b'\r').count() - crlf
}

fuzz_target!(|input: Input| {
    let options = EngineOptions {
        cache_capacity: 16,
        ..EngineOptions::default()
    };
    let mut engine: TextEngine<'_, usize> = TextEngine::with_document(
        piecetext::Document::from_bytes(input.initial.clone()),
        options,
    );
    engine.set_language(LanguageDef::cpp());
    let mut model = input.initial;

    for edit in input.edits.into_iter().take(64) {
        let line = |seed: u16, engine: &TextEngine<'_, usize>| seed as usize % engine.line_count();
        match edit {
            Edit::Insert { line: l, col, text } => {
                let l = line(l, &engine);
                let span = engine.document().line_span(l).unwrap();
                let col = col as usize % (span.len + 1);
                let offset = span.offset + col;
                engine.insert(l, col, &text).unwrap();
                model.splice(offset..offset, text);
            }
            Edit::Erase { line: l, col, count } => {
                let l = line(l, &engine);
                let span = engine.document().line_span(l).unwrap();
                let col = col as usize % (span.len + 1);
                let offset = span.offset + col;
                let count = (count as usize).min(model.len() - offset);
                engine.erase(l, col, count).unwrap();
                model.drain(offset..offset + count);
            }
            Edit::Shape { line: l } => {
                let l = line(l, &engine);
                let len = engine.line(l).unwrap().len();
                assert_eq!(*engine.shaped_line(l, |text| text.len()).unwrap(), len);
            }
            Edit::Decorate { line: l } => {
                let l = line(l, &engine);
                let fresh = IncrementalLexer::for_language(LanguageDef::cpp());
                assert_eq!(
                    engine.lexer().tokens(engine.document(), l),
                    fresh.tokens(engine.document(), l)
                );
            }
        }

        assert_eq!(engine.text(), model);
        assert_eq!(engine.line_count(), terminators(&model) + 1);
        for cached in engine.cache().lines_by_recency() {
            let hash = fnv1a64(&engine.line(cached).unwrap());
            assert!(engine.cache().peek(cached, hash).is_some());
        }
    }
});
