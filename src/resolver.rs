//! Span resolution
//!
//! Turns the raw, overlapping scan output into an [`AnnotationSet`].
//! Tiers are processed from highest to lowest priority and the first span
//! to claim a range keeps all of it: an intersecting later span is dropped
//! whole, never clipped.

use std::collections::BTreeMap;

use crate::span::{AnnotationSet, Span};
use crate::table::PatternTable;

/// Claimed character ranges, keyed by start
#[derive(Default)]
struct Claimed {
    ranges: BTreeMap<usize, usize>,
}

impl Claimed {
    /// Check whether `[start, end)` intersects any claimed range
    fn intersects(&self, start: usize, end: usize) -> bool {
        // Nearest claim starting before `end`; claims never overlap, so only
        // that one can reach into the candidate.
        self.ranges
            .range(..end)
            .next_back()
            .is_some_and(|(_, &claimed_end)| claimed_end > start)
    }

    fn claim(&mut self, start: usize, end: usize) {
        self.ranges.insert(start, end);
    }
}

/// Resolve raw spans into a sorted, non-overlapping set
///
/// Spans whose category has no pattern in `table` are ignored.
pub fn resolve(table: &PatternTable, raw: &[Span]) -> AnnotationSet {
    let mut claimed = Claimed::default();
    let mut accepted: Vec<Span> = Vec::new();
    let mut discarded = 0usize;

    for pattern in table.rules_in_priority_order() {
        let mut tier: Vec<Span> = raw
            .iter()
            .filter(|s| s.category == pattern.category && s.start < s.end)
            .copied()
            .collect();
        tier.sort_by_key(|s| (s.start, s.end));

        for span in tier {
            if claimed.intersects(span.start, span.end) {
                discarded += 1;
                continue;
            }
            claimed.claim(span.start, span.end);
            accepted.push(span);
        }
    }

    accepted.sort_by_key(|s| (s.start, s.end));
    tracing::trace!(accepted = accepted.len(), discarded, "resolved spans");
    AnnotationSet::from_sorted(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::rules::Rule;

    #[test]
    fn test_resolve_empty() {
        assert!(resolve(&PatternTable::builtin(), &[]).is_empty());
        let raw = [Span::new(0, 3, Category::Keyword)];
        assert!(resolve(&PatternTable::new(), &raw).is_empty());
    }

    #[test]
    fn test_higher_priority_claims_first() {
        let raw = [
            Span::new(2, 5, Category::Number),
            Span::new(0, 11, Category::Comment),
        ];
        let set = resolve(&PatternTable::builtin(), &raw);
        assert_eq!(set.spans(), &[Span::new(0, 11, Category::Comment)]);
    }

    #[test]
    fn test_loser_is_dropped_not_clipped() {
        let raw = [
            Span::new(4, 12, Category::StringLiteral),
            Span::new(7, 15, Category::Comment),
        ];
        let set = resolve(&PatternTable::builtin(), &raw);
        assert_eq!(set.spans(), &[Span::new(7, 15, Category::Comment)]);
    }

    #[test]
    fn test_same_tier_first_claim_wins() {
        let raw = [
            Span::new(3, 8, Category::StringLiteral),
            Span::new(0, 5, Category::StringLiteral),
        ];
        let set = resolve(&PatternTable::builtin(), &raw);
        assert_eq!(set.spans(), &[Span::new(0, 5, Category::StringLiteral)]);
    }

    #[test]
    fn test_touching_spans_both_accepted() {
        let raw = [
            Span::new(3, 6, Category::Number),
            Span::new(0, 3, Category::Keyword),
        ];
        let set = resolve(&PatternTable::builtin(), &raw);
        assert_eq!(
            set.spans(),
            &[
                Span::new(0, 3, Category::Keyword),
                Span::new(3, 6, Category::Number)
            ]
        );
    }

    #[test]
    fn test_custom_priorities_change_winner() {
        let mut table = PatternTable::builtin();
        table.replace(Category::Number, Rule::decimal_integer().unwrap(), 500);
        let raw = [
            Span::new(0, 11, Category::Comment),
            Span::new(8, 11, Category::Number),
        ];
        let set = resolve(&table, &raw);
        assert_eq!(set.spans(), &[Span::new(8, 11, Category::Number)]);
    }

    #[test]
    fn test_claimed_intersects() {
        let mut claimed = Claimed::default();
        claimed.claim(5, 10);
        claimed.claim(20, 25);
        assert!(!claimed.intersects(0, 5));
        assert!(claimed.intersects(0, 6));
        assert!(claimed.intersects(9, 12));
        assert!(!claimed.intersects(10, 20));
        assert!(claimed.intersects(6, 7));
        assert!(claimed.intersects(0, 30));
        assert!(!claimed.intersects(25, 30));
    }
}
