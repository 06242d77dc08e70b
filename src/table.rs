//! Pattern table
//!
//! Binds each category to one rule and a priority. The table is the only
//! configuration the tokenizer and resolver read.

use crate::category::Category;
use crate::error::{HighlightError, Result};
use crate::rules::{Rule, PYTHON_KEYWORDS};

/// One category's matching rule and its overlap-resolution priority
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Category assigned to matches
    pub category: Category,
    /// Matching rule
    pub rule: Rule,
    /// Priority (higher = claims text first)
    pub priority: i32,
}

/// Ordered set of patterns, at most one per category
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    /// Patterns sorted by priority (highest first)
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The four builtin rules with the builtin keyword set
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(Category::Comment, Rule::line_comment());
        let compiled = [
            (Category::StringLiteral, Rule::quoted_string()),
            (Category::Keyword, Rule::keywords(PYTHON_KEYWORDS)),
            (Category::Number, Rule::decimal_integer()),
        ];
        for (category, rule) in compiled {
            match rule {
                Ok(rule) => table.insert(category, rule),
                Err(err) => tracing::warn!(%category, %err, "builtin rule rejected"),
            }
        }
        table
    }

    /// The builtin rules with a custom keyword set
    pub fn with_keywords<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let mut table = Self::builtin();
        table.replace(
            Category::Keyword,
            Rule::keywords(words)?,
            Category::Keyword.default_priority(),
        );
        Ok(table)
    }

    fn insert(&mut self, category: Category, rule: Rule) {
        self.replace(category, rule, category.default_priority());
    }

    /// Add a rule for a category
    ///
    /// Fails if the category already has a rule; use [`PatternTable::replace`]
    /// to overwrite on purpose.
    pub fn register(&mut self, category: Category, rule: Rule, priority: i32) -> Result<()> {
        if self.get(category).is_some() {
            return Err(HighlightError::DuplicateCategory(category));
        }
        self.push(Pattern {
            category,
            rule,
            priority,
        });
        Ok(())
    }

    /// Compile `pattern` and register it for a category
    pub fn register_pattern(&mut self, category: Category, pattern: &str, priority: i32) -> Result<()> {
        let rule = Rule::new(pattern)
            .map_err(|source| HighlightError::InvalidPattern { category, source })?;
        self.register(category, rule, priority)
    }

    /// Add or overwrite the rule for a category, returning the previous one
    pub fn replace(&mut self, category: Category, rule: Rule, priority: i32) -> Option<Pattern> {
        let previous = self.remove(category);
        self.push(Pattern {
            category,
            rule,
            priority,
        });
        previous
    }

    /// Remove a category's rule
    pub fn remove(&mut self, category: Category) -> Option<Pattern> {
        let idx = self.patterns.iter().position(|p| p.category == category)?;
        Some(self.patterns.remove(idx))
    }

    fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
        // Keep sorted by priority (highest first), category order on ties
        self.patterns.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.category.rank().cmp(&b.category.rank()))
        });
    }

    /// Pattern registered for a category
    pub fn get(&self, category: Category) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.category == category)
    }

    /// Patterns, highest priority first
    pub fn rules_in_priority_order(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
