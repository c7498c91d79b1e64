//! Syntax highlighting performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use piecetext::highlight::{CLikeScanner, IncrementalLexer, LanguageDef, LineState, Tokenizer};
use piecetext::{DecorationSource, TextEngine};
use std::hint::black_box;

const SAMPLE_LINES: [&str; 4] = [
    "int main(int argc, char **argv) { return 0; }",
    "std::vector<std::string> names = {\"a\", \"b\"};",
    "/* a block comment that closes */ x = 0x1F'FFu;",
    "#include <unordered_map>",
];

fn build_source(lines: usize) -> String {
    "int example() { int x = 42; /* note */ return x; }\n".repeat(lines)
}

fn bench_scan_line(c: &mut Criterion) {
    let scanner = CLikeScanner::cpp();
    let mut group = c.benchmark_group("highlight_scan_line");
    for (idx, line) in SAMPLE_LINES.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("line", idx), line, |b, input| {
            b.iter(|| scanner.scan_line(black_box(input.as_bytes()), LineState::Normal));
        });
    }
    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let source_small = build_source(1_000);
    let source_large = build_source(10_000);

    let mut group = c.benchmark_group("highlight_full_scan");
    for (name, source) in [("1k_lines", &source_small), ("10k_lines", &source_large)] {
        let engine: TextEngine<'_> = TextEngine::from_bytes(source.as_str());
        let last = engine.line_count() - 1;
        group.bench_function(name, |b| {
            b.iter(|| {
                let lexer = IncrementalLexer::for_language(LanguageDef::cpp());
                black_box(lexer.decorate(engine.document(), last))
            });
        });
    }
    group.finish();
}

fn bench_incremental_edit(c: &mut Criterion) {
    let source = build_source(10_000);
    let mut group = c.benchmark_group("highlight_incremental");

    // Edit that keeps the exit state: early stop after one line.
    group.bench_function("stable_edit_10k", |b| {
        b.iter_batched(
            || {
                let mut engine: TextEngine<'_> = TextEngine::from_bytes(source.as_str());
                engine.set_language(LanguageDef::cpp());
                let last = engine.line_count() - 1;
                let _ = engine.decorations(last);
                engine
            },
            |mut engine| {
                engine.insert(5_000, 0, " ").unwrap();
                let last = engine.line_count() - 1;
                black_box(engine.decorations(last).unwrap());
                engine
            },
            BatchSize::LargeInput,
        );
    });

    // Opening a comment forces a rescan to the end.
    group.bench_function("comment_open_10k", |b| {
        b.iter_batched(
            || {
                let mut engine: TextEngine<'_> = TextEngine::from_bytes(source.as_str());
                engine.set_language(LanguageDef::cpp());
                let last = engine.line_count() - 1;
                let _ = engine.decorations(last);
                engine
            },
            |mut engine| {
                engine.insert(5_000, 0, "/*").unwrap();
                let last = engine.line_count() - 1;
                black_box(engine.decorations(last).unwrap());
                engine
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scan_line,
    bench_full_scan,
    bench_incremental_edit
);
criterion_main!(benches);
