//! Styled byte ranges produced by decoration sources.

use crate::style::Style;
use std::ops::Range;

/// Style applied to bytes `start..end` of one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledSpan {
    pub start: usize,
    pub end: usize,
    pub style: Style,
    /// Higher wins when spans from several sources overlap.
    pub priority: i32,
}

impl StyledSpan {
    #[must_use]
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self {
            start,
            end,
            style,
            priority: 0,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All spans one source produced for one line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineDecoration {
    pub spans: Vec<StyledSpan>,
}

impl LineDecoration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: StyledSpan) {
        self.spans.push(span);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyledSpan> {
        self.spans.iter()
    }

    /// Add `delta` to every span's priority.
    pub fn shift_priority(&mut self, delta: i32) {
        for span in &mut self.spans {
            span.priority = span.priority.saturating_add(delta);
        }
    }
}

impl Extend<StyledSpan> for LineDecoration {
    fn extend<I: IntoIterator<Item = StyledSpan>>(&mut self, iter: I) {
        self.spans.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LineDecoration {
    type Item = &'a StyledSpan;
    type IntoIter = std::slice::Iter<'a, StyledSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_accessors() {
        let span = StyledSpan::new(2, 6, Style::DEFAULT).with_priority(3);
        assert_eq!(span.range(), 2..6);
        assert_eq!(span.len(), 4);
        assert_eq!(span.priority, 3);
        assert!(StyledSpan::new(5, 2, Style::DEFAULT).is_empty());
    }

    #[test]
    fn shift_priority_saturates() {
        let mut deco = LineDecoration::new();
        deco.push(StyledSpan::new(0, 1, Style::DEFAULT).with_priority(i32::MAX));
        deco.push(StyledSpan::new(1, 2, Style::DEFAULT));
        deco.shift_priority(10);
        let priorities: Vec<_> = deco.iter().map(|s| s.priority).collect();
        assert_eq!(priorities, vec![i32::MAX, 10]);
    }
}
