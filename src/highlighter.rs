//! The pure scan + resolve pipeline

use crate::category::Category;
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::resolver::resolve;
use crate::span::AnnotationSet;
use crate::style::{Style, StyleMap};
use crate::table::PatternTable;
use crate::tokenizer::scan;

/// Immutable highlighting pipeline
///
/// Holds the pattern table and the style map supplied at construction.
/// `highlight` takes `&self` and touches no shared state, so one instance
/// can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Highlighter {
    table: PatternTable,
    styles: StyleMap,
}

impl Highlighter {
    pub fn new(table: PatternTable, styles: StyleMap) -> Self {
        Self { table, styles }
    }

    /// Builtin rules with default styles
    pub fn builtin() -> Self {
        Self::new(PatternTable::builtin(), StyleMap::default())
    }

    /// Build from a loaded configuration
    ///
    /// A disabled configuration yields an empty table, so every text
    /// highlights to an empty set.
    pub fn from_config(config: &HighlightConfig) -> Result<Self> {
        if !config.enabled {
            tracing::debug!("highlighting disabled by configuration");
            return Ok(Self::new(PatternTable::new(), config.styles));
        }
        let table = match &config.keywords {
            Some(words) => PatternTable::with_keywords(words)?,
            None => PatternTable::builtin(),
        };
        Ok(Self::new(table, config.styles))
    }

    /// Classify `text` into a sorted, non-overlapping annotation set
    pub fn highlight(&self, text: &str) -> AnnotationSet {
        let raw = scan(&self.table, text);
        resolve(&self.table, &raw)
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Rendering hint for a category
    pub fn style_for(&self, category: Category) -> Style {
        self.styles.get(category)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use crate::style::Color;

    #[test]
    fn test_highlight_mixed_line() {
        let hl = Highlighter::builtin();
        let set = hl.highlight("if x == 'a': return 3  # done");
        assert_eq!(
            set.spans(),
            &[
                Span::new(0, 2, Category::Keyword),
                Span::new(8, 11, Category::StringLiteral),
                Span::new(13, 19, Category::Keyword),
                Span::new(20, 21, Category::Number),
                Span::new(23, 29, Category::Comment),
            ]
        );
    }

    #[test]
    fn test_from_config_keywords() {
        let config = HighlightConfig {
            keywords: Some(vec!["let".to_string()]),
            ..HighlightConfig::default()
        };
        let hl = Highlighter::from_config(&config).unwrap();
        let set = hl.highlight("let for");
        assert_eq!(set.spans(), &[Span::new(0, 3, Category::Keyword)]);
    }

    #[test]
    fn test_from_config_disabled() {
        let config = HighlightConfig {
            enabled: false,
            keywords: Some(vec!["let".to_string()]),
            ..HighlightConfig::default()
        };
        let hl = Highlighter::from_config(&config).unwrap();
        assert!(hl.table().is_empty());
        assert!(hl.highlight("let x = 1 # c").is_empty());
    }

    #[test]
    fn test_style_for_uses_supplied_map() {
        let styles = StyleMap::default().with(Category::Comment, Style::fg(Color::Red));
        let hl = Highlighter::new(PatternTable::builtin(), styles);
        assert_eq!(hl.style_for(Category::Comment), Style::fg(Color::Red));
    }

    #[test]
    fn test_highlighter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Highlighter>();
    }
}
