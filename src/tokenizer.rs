//! Raw scanning
//!
//! Every pattern runs over the whole text on its own. Overlaps between
//! categories are expected here and settled by the resolver.

use crate::span::Span;
use crate::table::PatternTable;

/// Byte to character offset conversion for one text snapshot
enum CharIndex {
    /// ASCII text: byte and character offsets coincide
    Ascii,
    /// Byte offset of every character start
    Boundaries(Vec<usize>),
}

impl CharIndex {
    fn new(text: &str) -> Self {
        if text.is_ascii() {
            CharIndex::Ascii
        } else {
            CharIndex::Boundaries(text.char_indices().map(|(i, _)| i).collect())
        }
    }

    /// Character offset of a byte offset on a char boundary (or text end)
    fn char_offset(&self, byte: usize) -> usize {
        match self {
            CharIndex::Ascii => byte,
            CharIndex::Boundaries(starts) => starts.partition_point(|&b| b < byte),
        }
    }
}

/// Run every rule in `table` over `text` and collect all non-empty matches
///
/// The result is grouped by pattern in priority order, each group in text
/// order. Never fails: text a rule cannot match just yields no span.
pub fn scan(table: &PatternTable, text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    if text.is_empty() {
        return spans;
    }

    let index = CharIndex::new(text);
    for pattern in table.rules_in_priority_order() {
        let before = spans.len();
        spans.extend(
            pattern
                .rule
                .find_iter(text)
                .filter(|&(start, end)| start < end)
                .map(|(start, end)| {
                    Span::new(index.char_offset(start), index.char_offset(end), pattern.category)
                }),
        );
        tracing::trace!(
            category = %pattern.category,
            matches = spans.len() - before,
            "scanned pattern"
        );
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::rules::Rule;

    #[test]
    fn test_scan_empty_text() {
        assert!(scan(&PatternTable::builtin(), "").is_empty());
    }

    #[test]
    fn test_scan_empty_table() {
        assert!(scan(&PatternTable::new(), "for x in 1").is_empty());
    }

    #[test]
    fn test_scan_keeps_overlaps() {
        let spans = scan(&PatternTable::builtin(), "# 1");
        assert!(spans.contains(&Span::new(0, 3, Category::Comment)));
        assert!(spans.contains(&Span::new(2, 3, Category::Number)));
    }

    #[test]
    fn test_scan_discards_zero_width() {
        let mut table = PatternTable::new();
        table.register(Category::Number, Rule::new(r"\d*").unwrap(), 1).unwrap();
        let spans = scan(&table, "a 12 b");
        assert_eq!(spans, vec![Span::new(2, 4, Category::Number)]);
    }

    #[test]
    fn test_scan_uses_char_offsets() {
        let spans = scan(&PatternTable::builtin(), "é = 7 # ü");
        assert!(spans.contains(&Span::new(4, 5, Category::Number)));
        assert!(spans.contains(&Span::new(6, 9, Category::Comment)));
    }

    #[test]
    fn test_scan_whole_buffer() {
        let spans = scan(&PatternTable::builtin(), "if x:\n    return 1");
        assert!(spans.contains(&Span::new(0, 2, Category::Keyword)));
        assert!(spans.contains(&Span::new(10, 16, Category::Keyword)));
        assert!(spans.contains(&Span::new(17, 18, Category::Number)));
    }

    #[test]
    fn test_char_index() {
        let index = CharIndex::new("aé b");
        assert_eq!(index.char_offset(0), 0);
        assert_eq!(index.char_offset(1), 1);
        assert_eq!(index.char_offset(3), 2);
        assert_eq!(index.char_offset(5), 4);
    }
}
