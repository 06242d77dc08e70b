//! Configuration file support
//!
//! Loads highlighting settings from ~/.tinted.toml (or
//! %USERPROFILE%\.tinted.toml on Windows). A missing file means defaults.
//!
//! Example:
//! ```toml
//! enabled = true
//! # Replace the builtin keyword set...
//! keywords = ["def", "class", "return"]
//! # ...or extend it
//! extra_keywords = ["self", "print"]
//!
//! [styles.keyword]
//! fg = "magenta"
//! bold = true
//!
//! [styles.comment]
//! fg = "bright-black"
//! italic = true
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::category::Category;
use crate::error::{HighlightError, Result};
use crate::rules::PYTHON_KEYWORDS;
use crate::style::{Color, Style, StyleMap};

const CONFIG_FILE: &str = ".tinted.toml";

/// Highlighting settings
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightConfig {
    /// When false, [`Highlighter::from_config`](crate::Highlighter::from_config)
    /// builds a highlighter with no patterns
    pub enabled: bool,
    /// Rendering hint per category
    pub styles: StyleMap,
    /// Keyword set override (None = builtin set)
    pub keywords: Option<Vec<String>>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            styles: StyleMap::default(),
            keywords: None,
        }
    }
}

impl HighlightConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading highlight config");
                Self::from_toml_str(&contents)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Self::default();
        let mut extra_keywords: Vec<String> = Vec::new();

        for (key, value) in &table {
            match key.as_str() {
                "enabled" => {
                    config.enabled = value
                        .as_bool()
                        .ok_or_else(|| invalid("enabled", "expected a boolean"))?;
                }
                "keywords" => config.keywords = Some(parse_words(key, value)?),
                "extra_keywords" => extra_keywords = parse_words(key, value)?,
                "styles" => {
                    let styles = value
                        .as_table()
                        .ok_or_else(|| invalid("styles", "expected a table"))?;
                    config.apply_styles(styles)?;
                }
                other => tracing::warn!(key = other, "ignoring unknown config key"),
            }
        }

        if !extra_keywords.is_empty() {
            let words = config
                .keywords
                .get_or_insert_with(|| PYTHON_KEYWORDS.iter().map(|w| w.to_string()).collect());
            words.extend(extra_keywords);
        }

        Ok(config)
    }

    fn apply_styles(&mut self, styles: &Table) -> Result<()> {
        for (name, value) in styles {
            let category = Category::from_name(name)
                .ok_or_else(|| invalid(name, "unknown category"))?;
            let entry = value
                .as_table()
                .ok_or_else(|| invalid(name, "expected a style table"))?;
            let style = parse_style(name, entry, category.default_style())?;
            self.styles.set(category, style);
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> HighlightError {
    HighlightError::Config(format!("{key}: {reason}"))
}

fn parse_words(key: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(key, "expected an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(key, "expected an array of strings"))
        })
        .collect()
}

/// Overlay the fields present in `entry` onto `base`
fn parse_style(name: &str, entry: &Table, base: Style) -> Result<Style> {
    let mut style = base;
    for (field, value) in entry {
        match field.as_str() {
            "fg" | "bg" => {
                let color = value
                    .as_str()
                    .and_then(Color::from_name)
                    .ok_or_else(|| invalid(name, &format!("bad color for {field}")))?;
                if field == "fg" {
                    style.fg = color;
                } else {
                    style.bg = color;
                }
            }
            "bold" | "italic" | "underline" | "reverse" => {
                let flag = value
                    .as_bool()
                    .ok_or_else(|| invalid(name, &format!("{field} must be a boolean")))?;
                match field.as_str() {
                    "bold" => style.bold = flag,
                    "italic" => style.italic = flag,
                    "underline" => style.underline = flag,
                    _ => style.reverse = flag,
                }
            }
            other => tracing::warn!(category = name, field = other, "ignoring unknown style field"),
        }
    }
    Ok(style)
}
