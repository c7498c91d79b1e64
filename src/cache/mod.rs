//! Caching of per-line layout results.
//!
//! [`ShapedLineCache`] stores whatever a caller produced for a line (glyph
//! runs, measured widths, wrapped segments) keyed by line number and guarded
//! by an FNV-1a hash of the line text from [`fnv1a64`].

mod hash;
mod line_cache;

pub use hash::{FNV_OFFSET_BASIS, FNV_PRIME, Fnv1aHasher, FnvBuildHasher, fnv1a64};
pub use line_cache::{CacheStats, DEFAULT_CAPACITY, ShapedLineCache};
