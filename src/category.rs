//! Lexical categories
//!
//! The closed set of classes the engine can assign to a region of text,
//! together with their default priority and default style.

use std::fmt;

use crate::style::{Color, Style};

/// Lexical category of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Line comments (`# ...`)
    Comment,
    /// String literals (`"..."` or `'...'`)
    StringLiteral,
    /// Reserved words
    Keyword,
    /// Decimal integer literals
    Number,
}

impl Category {
    /// All categories, in fixed tie-break order (highest default priority first)
    pub const ALL: [Category; 4] = [
        Category::Comment,
        Category::StringLiteral,
        Category::Keyword,
        Category::Number,
    ];

    /// Priority used by the builtin pattern table (higher = resolved first)
    pub fn default_priority(&self) -> i32 {
        match self {
            Category::Comment => 100,
            Category::StringLiteral => 90,
            Category::Keyword => 80,
            Category::Number => 60,
        }
    }

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Comment => Style::fg(Color::BrightBlack).with_italic(),
            Category::StringLiteral => Style::fg(Color::Green),
            Category::Number => Style::fg(Color::Cyan),
            Category::Keyword => Style::fg(Color::Magenta).with_bold(),
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Comment => "Comment",
            Category::StringLiteral => "String",
            Category::Keyword => "Keyword",
            Category::Number => "Number",
        }
    }

    /// Parse a category from a name (for TOML loading)
    ///
    /// Case-insensitive. `string` and `stringliteral` both map to
    /// [`Category::StringLiteral`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "comment" => Some(Category::Comment),
            "string" | "stringliteral" | "string_literal" => Some(Category::StringLiteral),
            "keyword" => Some(Category::Keyword),
            "number" => Some(Category::Number),
            _ => None,
        }
    }

    /// Position in [`Category::ALL`], used to break priority ties
    pub(crate) fn rank(&self) -> usize {
        match self {
            Category::Comment => 0,
            Category::StringLiteral => 1,
            Category::Keyword => 2,
            Category::Number => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priority_order() {
        let priorities: Vec<i32> = Category::ALL.iter().map(|c| c.default_priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_default_styles_not_empty() {
        for category in Category::ALL {
            assert!(!category.default_style().is_default());
        }
    }

    #[test]
    fn test_from_name_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
        assert_eq!(Category::from_name("StringLiteral"), Some(Category::StringLiteral));
        assert_eq!(Category::from_name("KEYWORD"), Some(Category::Keyword));
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(Category::from_name("Operator"), None);
        assert_eq!(Category::from_name(""), None);
    }
}
