//! Spans and annotation sets

use std::ops::Range;

use crate::category::Category;
use crate::style::{Style, StyleMap};

/// A classified region of text
///
/// Offsets are character (not byte) positions into the text snapshot the
/// span was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Character offset where this span starts (inclusive)
    pub start: usize,
    /// Character offset where this span ends (exclusive)
    pub end: usize,
    /// Category assigned to this span
    pub category: Category,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, category: Category) -> Self {
        Self {
            start,
            end,
            category,
        }
    }

    /// Check if this span contains a character position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check whether two half-open ranges share at least one position
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Get the length of this span in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Character range covered by this span
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Sorted, non-overlapping spans for one text snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    spans: Vec<Span>,
}

impl AnnotationSet {
    /// An empty set (plain text everywhere)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from spans that already satisfy the ordering invariant
    ///
    /// Only the resolver produces sets, so the invariant is checked in debug
    /// builds rather than reported.
    pub(crate) fn from_sorted(spans: Vec<Span>) -> Self {
        debug_assert!(spans.iter().all(|s| s.start < s.end));
        debug_assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Span covering a character position, if any
    pub fn span_at(&self, pos: usize) -> Option<&Span> {
        let idx = self.spans.partition_point(|s| s.end <= pos);
        self.spans.get(idx).filter(|s| s.contains(pos))
    }

    /// Category at a character position (`None` = plain text)
    pub fn category_at(&self, pos: usize) -> Option<Category> {
        self.span_at(pos).map(|s| s.category)
    }

    /// Spans intersecting a character range, e.g. the visible viewport
    pub fn in_range(&self, range: Range<usize>) -> &[Span] {
        let lo = self.spans.partition_point(|s| s.end <= range.start);
        let hi = self.spans.partition_point(|s| s.start < range.end);
        &self.spans[lo..hi.max(lo)]
    }

    /// Pair each span with its rendering hint
    pub fn styled<'a>(&'a self, styles: &'a StyleMap) -> impl Iterator<Item = (Span, Style)> + 'a {
        self.spans.iter().map(move |span| (*span, styles.get(span.category)))
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}
