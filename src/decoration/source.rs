//! Producers of per-line decorations.

use crate::decoration::span::LineDecoration;
use crate::text::{EditSummary, LineSource};

/// Anything that styles lines: the syntax lexer, search hits, diagnostics.
///
/// `decorate` takes `&self` and reads line text through `lines`; sources
/// that cache derived state update it through interior mutability and are
/// therefore not safe to query concurrently. Sources must be `Send` so an
/// engine holding them can move to the thread that owns its lock.
pub trait DecorationSource: Send {
    /// Unique name, used to remove the source again.
    fn name(&self) -> &str;

    /// Added to the priority of every span this source returns.
    fn base_priority(&self) -> i32 {
        0
    }

    /// Spans for `line`; empty when the line is out of range.
    fn decorate(&self, lines: &dyn LineSource, line: usize) -> LineDecoration;

    /// Called after every edit, once the document is updated.
    fn on_edit(&mut self, _edit: &EditSummary) {}
}
