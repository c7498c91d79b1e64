//! Bounded LRU cache of shaped lines.
//!
//! Entries are keyed by line number and carry the hash of the line text
//! they were shaped from. A lookup only hits when the caller's fresh hash
//! matches, so a line number reused for different text after an edit can
//! never serve a stale result, even if invalidation bookkeeping missed it.
//!
//! Storage is a slab of slots threaded on an intrusive doubly linked list
//! (most recently used at the head) plus a line → slot map. Get, put,
//! touch and eviction are O(1); range invalidation is O(entries).

use crate::cache::hash::FnvBuildHasher;
use std::collections::HashMap;

/// Default number of cached lines.
pub const DEFAULT_CAPACITY: usize = 512;

const NIL: usize = usize::MAX;

/// Hit/miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that returned an entry.
    pub hits: u64,
    /// Lookups with no entry for the line.
    pub misses: u64,
    /// Lookups that found an entry with a different hash.
    pub stale: u64,
    /// Entries evicted to make room.
    pub evictions: u64,
}

#[derive(Debug)]
struct Slot<R> {
    line: usize,
    hash: u64,
    value: Option<R>,
    prev: usize,
    next: usize,
}

/// LRU map from line number to `(content hash, shaped result)`.
///
/// # Examples
///
/// ```
/// use piecetext::cache::{ShapedLineCache, fnv1a64};
///
/// let mut cache = ShapedLineCache::with_capacity(2);
/// let hash = fnv1a64(b"int x;");
/// cache.put(0, hash, "glyphs for line 0");
/// assert_eq!(cache.get(0, hash), Some(&"glyphs for line 0"));
/// assert_eq!(cache.get(0, fnv1a64(b"int y;")), None);
/// ```
#[derive(Debug)]
pub struct ShapedLineCache<R> {
    capacity: usize,
    slots: Vec<Slot<R>>,
    free_list: Vec<usize>,
    index: HashMap<usize, usize, FnvBuildHasher>,
    head: usize,
    tail: usize,
    stats: CacheStats,
}

impl<R> Default for ShapedLineCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ShapedLineCache<R> {
    /// Cache holding [`DEFAULT_CAPACITY`] lines.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Cache holding at most `capacity` lines (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            slots: Vec::new(),
            free_list: Vec::new(),
            index: HashMap::default(),
            head: NIL,
            tail: NIL,
            stats: CacheStats::default(),
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when no entries are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// True if some entry (of any hash) is stored for `line`.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.index.contains_key(&line)
    }

    /// Counters since construction.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Cached line numbers from most to least recently used.
    #[must_use]
    pub fn lines_by_recency(&self) -> Vec<usize> {
        let mut lines = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while cursor != NIL {
            lines.push(self.slots[cursor].line);
            cursor = self.slots[cursor].next;
        }
        lines
    }

    /// Look up `line` and promote it to most recently used.
    ///
    /// Returns `None` on a miss or when the stored hash differs from `hash`.
    pub fn get(&mut self, line: usize, hash: u64) -> Option<&R> {
        let Some(&slot) = self.index.get(&line) else {
            self.stats.misses += 1;
            return None;
        };
        if self.slots[slot].hash != hash {
            self.stats.stale += 1;
            return None;
        }
        self.stats.hits += 1;
        self.touch(slot);
        self.slots[slot].value.as_ref()
    }

    /// Look up without promoting or counting.
    #[must_use]
    pub fn peek(&self, line: usize, hash: u64) -> Option<&R> {
        let &slot = self.index.get(&line)?;
        let entry = &self.slots[slot];
        if entry.hash == hash {
            entry.value.as_ref()
        } else {
            None
        }
    }

    /// Insert or overwrite the entry for `line` and make it most recently
    /// used, evicting the least recently used entry first when full.
    pub fn put(&mut self, line: usize, hash: u64, value: R) {
        if let Some(&slot) = self.index.get(&line) {
            let entry = &mut self.slots[slot];
            entry.hash = hash;
            entry.value = Some(value);
            self.touch(slot);
            return;
        }

        while self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let slot = self.alloc(line, hash, value);
        self.push_front(slot);
        self.index.insert(line, slot);
    }

    /// Return the valid entry for `(line, hash)`, shaping it with `shape`
    /// and storing the result on a miss or stale hit.
    pub fn get_or_insert_with<F>(&mut self, line: usize, hash: u64, shape: F) -> &R
    where
        F: FnOnce() -> R,
    {
        let hit = self
            .index
            .get(&line)
            .copied()
            .filter(|&slot| self.slots[slot].hash == hash);
        let slot = if let Some(slot) = hit {
            self.stats.hits += 1;
            self.touch(slot);
            slot
        } else {
            if self.index.contains_key(&line) {
                self.stats.stale += 1;
            } else {
                self.stats.misses += 1;
            }
            self.put(line, hash, shape());
            self.head
        };
        self.slots[slot]
            .value
            .as_ref()
            .unwrap_or_else(|| unreachable!("indexed slot always holds a value"))
    }

    /// Drop the entry for `line`, returning its value.
    pub fn invalidate(&mut self, line: usize) -> Option<R> {
        let slot = self.index.remove(&line)?;
        self.release(slot)
    }

    /// Account for an edit that removed or inserted lines.
    ///
    /// Entries keyed in `[first, first + removed_count)` are dropped. Every
    /// remaining entry keyed at or after `first + removed_count` is moved to
    /// `key + line_delta`. Keys are renumbered ascending for negative deltas
    /// and descending for positive deltas so a renumbered entry never lands
    /// on a slot that has yet to move. Recency order is unchanged.
    pub fn invalidate_range(&mut self, first: usize, removed_count: usize, line_delta: isize) {
        let shift_from = first.saturating_add(removed_count);

        let doomed: Vec<usize> = self
            .index
            .keys()
            .copied()
            .filter(|&line| line >= first && line < shift_from)
            .collect();
        for line in doomed {
            self.invalidate(line);
        }

        if line_delta == 0 {
            return;
        }

        let mut moving: Vec<usize> = self
            .index
            .keys()
            .copied()
            .filter(|&line| line >= shift_from)
            .collect();
        if line_delta > 0 {
            moving.sort_unstable_by(|a, b| b.cmp(a));
        } else {
            moving.sort_unstable();
        }

        for old in moving {
            let Some(slot) = self.index.remove(&old) else {
                continue;
            };
            let Some(new) = old.checked_add_signed(line_delta) else {
                self.release(slot);
                continue;
            };
            // Only reachable when the caller's delta exceeds the removed
            // range; the resident entry describes a line that no longer
            // exists at that number.
            if let Some(occupant) = self.index.remove(&new) {
                self.release(occupant);
            }
            self.slots[slot].line = new;
            self.index.insert(new, slot);
        }
    }

    /// Drop every entry (e.g. after a font or DPI change).
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.index.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    fn alloc(&mut self, line: usize, hash: u64, value: R) -> usize {
        let slot = Slot {
            line,
            hash,
            value: Some(value),
            prev: NIL,
            next: NIL,
        };
        if let Some(free) = self.free_list.pop() {
            self.slots[free] = slot;
            free
        } else {
            self.slots.push(slot);
            self.slots.len() - 1
        }
    }

    /// Unlink a slot that is no longer indexed and recycle it.
    fn release(&mut self, slot: usize) -> Option<R> {
        self.unlink(slot);
        self.free_list.push(slot);
        self.slots[slot].value.take()
    }

    fn evict_lru(&mut self) {
        let tail = self.tail;
        if tail == NIL {
            return;
        }
        let line = self.slots[tail].line;
        self.index.remove(&line);
        self.release(tail);
        self.stats.evictions += 1;
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }
        self.slots[slot].prev = NIL;
        self.slots[slot].next = NIL;
    }

    fn push_front(&mut self, slot: usize) {
        self.slots[slot].prev = NIL;
        self.slots[slot].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = slot;
        }
        self.head = slot;
        if self.tail == NIL {
            self.tail = slot;
        }
    }

    fn touch(&mut self, slot: usize) {
        if self.head != slot {
            self.unlink(slot);
            self.push_front(slot);
        }
    }
}
