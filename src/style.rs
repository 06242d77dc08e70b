//! Style types for rendering hints
//!
//! The engine never reads these: a [`StyleMap`] is supplied at construction
//! and handed back to the host next to the spans it classified.

use crate::category::Category;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from a config name such as `"bright-black"` or `"cyan"`
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let color = match normalized.as_str() {
            "default" | "none" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "brightblack" | "gray" | "grey" => Color::BrightBlack,
            "brightred" => Color::BrightRed,
            "brightgreen" => Color::BrightGreen,
            "brightyellow" => Color::BrightYellow,
            "brightblue" => Color::BrightBlue,
            "brightmagenta" => Color::BrightMagenta,
            "brightcyan" => Color::BrightCyan,
            "brightwhite" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set reverse
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Category to style lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleMap {
    pub keyword: Style,
    pub string_literal: Style,
    pub comment: Style,
    pub number: Style,
}

impl StyleMap {
    /// Style for a category
    pub fn get(&self, category: Category) -> Style {
        match category {
            Category::Keyword => self.keyword,
            Category::StringLiteral => self.string_literal,
            Category::Comment => self.comment,
            Category::Number => self.number,
        }
    }

    /// Replace the style for a category
    pub fn set(&mut self, category: Category, style: Style) {
        match category {
            Category::Keyword => self.keyword = style,
            Category::StringLiteral => self.string_literal = style,
            Category::Comment => self.comment = style,
            Category::Number => self.number = style,
        }
    }

    /// Builder form of [`StyleMap::set`]
    pub fn with(mut self, category: Category, style: Style) -> Self {
        self.set(category, style);
        self
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            keyword: Category::Keyword.default_style(),
            string_literal: Category::StringLiteral.default_style(),
            comment: Category::Comment.default_style(),
            number: Category::Number.default_style(),
        }
    }
}
