//! Matching rules
//!
//! A [`Rule`] is a compiled regex or a small scanner run over the full
//! text. The builtin constructors build the four rules the default pattern
//! table uses.

use regex::Regex;

use crate::category::Category;
use crate::error::{HighlightError, Result};

/// Name of the optional capture group that narrows a match to its token
pub const TOKEN_GROUP: &str = "token";

/// Python reserved words, the builtin keyword set
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

const QUOTED_STRING: &str = r#""(?:[^"\\\n]|\\(?s:.))*"|'(?:[^'\\\n]|\\(?s:.))*'"#;

const DECIMAL_INTEGER: &str = r"\b[0-9]+\b";

#[derive(Debug, Clone)]
enum Matcher {
    /// Compiled regex, optionally narrowed to the `token` group
    Pattern { regex: Regex, token_group: Option<usize> },
    /// `#` to end of line, outside string literals
    LineComment,
}

/// A matching rule
#[derive(Debug, Clone)]
pub struct Rule {
    matcher: Matcher,
}

impl Rule {
    /// Compile a rule from a regex pattern
    ///
    /// If the pattern defines a group named `token`, spans cover that group
    /// instead of the whole match.
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let token_group = regex
            .capture_names()
            .position(|name| name == Some(TOKEN_GROUP));
        Ok(Self {
            matcher: Matcher::Pattern { regex, token_group },
        })
    }

    fn builtin(category: Category, pattern: &str) -> Result<Self> {
        Self::new(pattern).map_err(|source| HighlightError::InvalidPattern { category, source })
    }

    /// Whole-word occurrences of a closed set of words
    pub fn keywords<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let mut escaped: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(regex::escape)
            .collect();
        if escaped.is_empty() {
            return Err(HighlightError::EmptyKeywordSet);
        }
        escaped.sort();
        escaped.dedup();
        let pattern = format!(r"\b(?:{})\b", escaped.join("|"));
        Self::builtin(Category::Keyword, &pattern)
    }

    /// Unescaped `#` to end of line, skipping `#` inside string literals
    ///
    /// Literals are delimited the same way [`Rule::quoted_string`] delimits
    /// them, so a quote with no partner on its line is plain text.
    pub fn line_comment() -> Self {
        Self {
            matcher: Matcher::LineComment,
        }
    }

    /// Single- or double-quoted literal up to the next unescaped matching quote
    pub fn quoted_string() -> Result<Self> {
        Self::builtin(Category::StringLiteral, QUOTED_STRING)
    }

    /// Whole-word runs of ASCII decimal digits
    pub fn decimal_integer() -> Result<Self> {
        Self::builtin(Category::Number, DECIMAL_INTEGER)
    }

    /// Source text of the underlying regex (None for scanner rules)
    pub fn pattern(&self) -> Option<&str> {
        match &self.matcher {
            Matcher::Pattern { regex, .. } => Some(regex.as_str()),
            Matcher::LineComment => None,
        }
    }

    /// All non-overlapping matches as byte ranges
    ///
    /// Matches are leftmost-first and may be zero-width; callers filter.
    pub fn find_iter<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = (usize, usize)> + 'a> {
        match &self.matcher {
            Matcher::Pattern {
                regex,
                token_group: Some(group),
            } => {
                let group = *group;
                Box::new(
                    regex
                        .captures_iter(text)
                        .filter_map(move |caps| caps.get(group))
                        .map(|m| (m.start(), m.end())),
                )
            }
            Matcher::Pattern {
                regex,
                token_group: None,
            } => Box::new(regex.find_iter(text).map(|m| (m.start(), m.end()))),
            Matcher::LineComment => Box::new(line_comments(text).into_iter()),
        }
    }
}

/// Byte offset of the quote closing the literal opened at `open`
///
/// A backslash escapes the next byte, line breaks included; an unescaped
/// `\n` or the end of text means the literal is unterminated.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

// Delimiters are ASCII, so walking bytes never splits a match inside a
// multi-byte character.
fn line_comments(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if matches!(bytes.get(i + 1), Some(b'#' | b'\\')) => i += 2,
            b'"' | b'\'' => match closing_quote(bytes, i) {
                Some(close) => i = close + 1,
                None => i += 1,
            },
            b'#' => {
                let end = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\r' || b == b'\n')
                    .map_or(bytes.len(), |n| i + n);
                found.push((i, end));
                i = end;
            }
            _ => i += 1,
        }
    }
    found
}
