//! Fuzz target for the single-line scanner.
//!
//! Tests that arbitrary bytes never panic the scanner and always produce
//! ordered, non-empty, in-bounds tokens from either entry state.

#![no_main]

use libfuzzer_sys::fuzz_target;
use piecetext::highlight::{CLikeScanner, LineState, Tokenizer};

fuzz_target!(|data: &[u8]| {
    let scanner = CLikeScanner::cpp();
    for entry in [LineState::Normal, LineState::InBlockComment] {
        let result = scanner.scan_line(data, entry);
        let mut last_end = 0;
        for token in &result.tokens {
            assert!(token.start >= last_end);
            assert!(token.start < token.end);
            assert!(token.end <= data.len());
            last_end = token.end;
        }
    }
    let _ = scanner.scan(data);
});
