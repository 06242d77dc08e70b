//! Error types for the highlighting engine

use thiserror::Error;

use crate::category::Category;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// Only configuration problems surface here. Matching never fails:
/// malformed or unterminated source text simply produces no span.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("category {0} already has a rule")]
    DuplicateCategory(Category),

    #[error("invalid pattern for {category}: {source}")]
    InvalidPattern {
        category: Category,
        #[source]
        source: regex::Error,
    },

    #[error("keyword set is empty")]
    EmptyKeywordSet,

    #[error("config error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_category() {
        let err = HighlightError::DuplicateCategory(Category::Comment);
        assert_eq!(err.to_string(), "category Comment already has a rule");
    }
}
