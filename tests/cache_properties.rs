//! Property-based tests for the shaped-line cache.
//!
//! The cache is driven with random operations next to a naive recency list
//! and both must agree on every lookup and on the final recency order.
//! Engine-level properties check that edits never leave an entry keyed at
//! a line whose current text hashes differently.

use piecetext::cache::{ShapedLineCache, fnv1a64};
use piecetext::{EngineOptions, TextEngine};
use proptest::prelude::*;

// ============================================================================
// Reference model
// ============================================================================

/// Most recently used first.
#[derive(Debug, Default)]
struct ModelCache {
    capacity: usize,
    entries: Vec<(usize, u64, u32)>,
}

impl ModelCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    fn position(&self, line: usize) -> Option<usize> {
        self.entries.iter().position(|&(l, _, _)| l == line)
    }

    fn get(&mut self, line: usize, hash: u64) -> Option<u32> {
        let pos = self.position(line)?;
        if self.entries[pos].1 != hash {
            return None;
        }
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.2)
    }

    fn put(&mut self, line: usize, hash: u64, value: u32) {
        if let Some(pos) = self.position(line) {
            self.entries.remove(pos);
        } else if self.entries.len() >= self.capacity {
            self.entries.pop();
        }
        self.entries.insert(0, (line, hash, value));
    }

    fn invalidate(&mut self, line: usize) {
        if let Some(pos) = self.position(line) {
            self.entries.remove(pos);
        }
    }

    fn invalidate_range(&mut self, first: usize, removed: usize, delta: isize) {
        let shift_from = first + removed;
        self.entries.retain(|&(l, _, _)| l < first || l >= shift_from);
        if delta == 0 {
            return;
        }
        let targets: Vec<usize> = self
            .entries
            .iter()
            .filter(|&&(l, _, _)| l >= shift_from)
            .filter_map(|&(l, _, _)| l.checked_add_signed(delta))
            .collect();
        // Entries that stay put lose to a moved entry landing on their key.
        self.entries.retain(|&(l, _, _)| l >= shift_from || !targets.contains(&l));
        self.entries = self
            .entries
            .iter()
            .filter_map(|&(l, h, v)| {
                if l >= shift_from {
                    l.checked_add_signed(delta).map(|n| (n, h, v))
                } else {
                    Some((l, h, v))
                }
            })
            .collect();
    }

    fn lines(&self) -> Vec<usize> {
        self.entries.iter().map(|&(l, _, _)| l).collect()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Get(usize, u64),
    Put(usize, u64, u32),
    Invalidate(usize),
    InvalidateRange(usize, usize, isize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    // Small key and hash spaces so collisions and stale hits are common.
    prop_oneof![
        4 => (0usize..16, 0u64..3).prop_map(|(l, h)| Op::Get(l, h)),
        4 => (0usize..16, 0u64..3, any::<u32>()).prop_map(|(l, h, v)| Op::Put(l, h, v)),
        1 => (0usize..16).prop_map(Op::Invalidate),
        2 => (0usize..16, 0usize..4, -6isize..6)
            .prop_map(|(f, r, d)| Op::InvalidateRange(f, r, d)),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    /// Random operation sequences agree with the naive model.
    #[test]
    fn cache_matches_model(capacity in 0usize..6, ops in prop::collection::vec(op(), 0..80)) {
        let mut cache = ShapedLineCache::with_capacity(capacity);
        let mut model = ModelCache::new(capacity);

        for op in ops {
            match op {
                Op::Get(line, hash) => {
                    prop_assert_eq!(cache.get(line, hash).copied(), model.get(line, hash));
                }
                Op::Put(line, hash, value) => {
                    cache.put(line, hash, value);
                    model.put(line, hash, value);
                }
                Op::Invalidate(line) => {
                    cache.invalidate(line);
                    model.invalidate(line);
                }
                Op::InvalidateRange(first, removed, delta) => {
                    cache.invalidate_range(first, removed, delta);
                    model.invalidate_range(first, removed, delta);
                }
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                }
            }
            prop_assert!(cache.len() <= cache.capacity());
            prop_assert_eq!(cache.lines_by_recency(), model.lines());
        }
    }

    /// A put is always served back, and a newer hash for the line hides it.
    #[test]
    fn put_then_get_hits(line in 0usize..1000, h1 in any::<u64>(), h2 in any::<u64>()) {
        prop_assume!(h1 != h2);
        let mut cache = ShapedLineCache::new();
        cache.put(line, h1, "first");
        prop_assert_eq!(cache.get(line, h1), Some(&"first"));
        cache.put(line, h2, "second");
        prop_assert_eq!(cache.get(line, h1), None);
        prop_assert_eq!(cache.get(line, h2), Some(&"second"));
    }
}

// ============================================================================
// Engine: no entry survives at a stale key
// ============================================================================

#[derive(Clone, Debug)]
enum EngineEdit {
    Insert { line: usize, col: usize, text: String },
    Erase { line: usize, col: usize, count: usize },
}

fn engine_edit() -> impl Strategy<Value = EngineEdit> {
    let text = prop::collection::vec(
        prop::sample::select(vec!["x", "yy", "\n", "\r", "\r\n", "\n\n"]),
        1..4,
    )
    .prop_map(|parts| parts.concat());
    prop_oneof![
        (any::<usize>(), any::<usize>(), text)
            .prop_map(|(line, col, text)| EngineEdit::Insert { line, col, text }),
        (any::<usize>(), any::<usize>(), 0usize..8)
            .prop_map(|(line, col, count)| EngineEdit::Erase { line, col, count }),
    ]
}

fn assert_no_stale_keys(engine: &TextEngine<'_, usize>) -> Result<(), TestCaseError> {
    for line in engine.cache().lines_by_recency() {
        prop_assert!(line < engine.line_count(), "entry for missing line {}", line);
        let hash = fnv1a64(&engine.line(line).unwrap());
        prop_assert!(
            engine.cache().peek(line, hash).is_some(),
            "entry for line {} was shaped from other text",
            line
        );
    }
    Ok(())
}

proptest! {
    /// After any edit every cached entry still matches its line's text.
    #[test]
    fn edits_leave_no_stale_entries(edits in prop::collection::vec(engine_edit(), 1..30)) {
        let options = EngineOptions { cache_capacity: 64, ..EngineOptions::default() };
        let mut engine: TextEngine<'_, usize> = TextEngine::with_document(
            piecetext::Document::from_bytes("l0\nl1\r\nl2\rl3\nl4\n\nl6"),
            options,
        );

        for edit in edits {
            for line in 0..engine.line_count() {
                engine.shaped_line(line, |text| text.len()).unwrap();
            }
            match edit {
                EngineEdit::Insert { line, col, text } => {
                    let line = line % engine.line_count();
                    let col = col % (engine.line(line).unwrap().len() + 1);
                    engine.insert(line, col, text).unwrap();
                }
                EngineEdit::Erase { line, col, count } => {
                    let line = line % engine.line_count();
                    let span = engine.document().line_span(line).unwrap();
                    let col = col % (span.len + 1);
                    let count = count.min(engine.len() - span.offset - col);
                    engine.erase(line, col, count).unwrap();
                }
            }
            assert_no_stale_keys(&engine)?;
            // Cached results that survived are still correct.
            for line in 0..engine.line_count() {
                let len = engine.line(line).unwrap().len();
                prop_assert_eq!(*engine.shaped_line(line, |text| text.len()).unwrap(), len);
            }
        }
    }
}

#[test]
fn inserted_lines_move_entries_without_stale_keys() {
    let mut engine: TextEngine<'_, String> = TextEngine::from_bytes("a\nb\nc\nd");
    for line in 0..4 {
        engine
            .shaped_line(line, |text| String::from_utf8_lossy(text).into_owned())
            .unwrap();
    }
    let before: Vec<u64> = (0..4)
        .map(|line| fnv1a64(&engine.line(line).unwrap()))
        .collect();

    // Insert two lines at line 1.
    engine.insert(1, 0, "x\ny\n").unwrap();

    // Old line 1's text moved to line 3; line 1's old hash no longer matches.
    let cache_probe = |line: usize, hash: u64| engine.cache().peek(line, hash).is_some();
    assert!(!cache_probe(1, before[1]));
    assert!(cache_probe(4, before[2]));
    assert!(cache_probe(5, before[3]));
    assert!(cache_probe(0, before[0]));
    assert_no_stale_keys_plain(&engine);
}

fn assert_no_stale_keys_plain(engine: &TextEngine<'_, String>) {
    for line in engine.cache().lines_by_recency() {
        let hash = fnv1a64(&engine.line(line).unwrap());
        assert!(engine.cache().peek(line, hash).is_some(), "stale entry at {line}");
    }
}
