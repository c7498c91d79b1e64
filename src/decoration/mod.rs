//! Styled spans, the sources that produce them, and the compositor that
//! merges several sources into one run list per line.

mod compositor;
mod source;
mod span;

pub use compositor::flatten;
pub use source::DecorationSource;
pub use span::{LineDecoration, StyledSpan};
