//! Terminal rendering helpers
//!
//! The engine stops at an [`AnnotationSet`]; these helpers are for hosts
//! that draw with crossterm or lay text out on a character grid.

use std::io::Write;
use std::ops::Range;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::category::Category;
use crate::error::Result;
use crate::span::AnnotationSet;
use crate::style::{Color, Style, StyleMap};

/// Part of a span that falls on one line, in display columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpan {
    pub columns: Range<usize>,
    pub category: Category,
}

/// Map a palette color onto crossterm's (None = terminal default)
pub fn term_color(color: Color) -> Option<TermColor> {
    let mapped = match color {
        Color::Default => return None,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    };
    Some(mapped)
}

fn char_width(ch: char) -> usize {
    match ch {
        '\r' => 0,
        _ => unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1),
    }
}

/// Column spans of one line, in column order
pub type LineSegments = Vec<ColumnSpan>;

fn close_segment(open: &mut Option<ColumnSpan>, lines: &mut [LineSegments]) {
    if let (Some(seg), Some(line)) = (open.take(), lines.last_mut()) {
        line.push(seg);
    }
}

/// Project spans onto per-line display columns
///
/// Returns one entry per line of `text`; spans crossing a line break are
/// split at it.
pub fn line_segments(text: &str, annotations: &AnnotationSet) -> Vec<LineSegments> {
    let spans = annotations.spans();
    let mut lines = vec![Vec::new()];
    let mut next = 0;
    let mut col = 0;
    let mut open: Option<ColumnSpan> = None;

    for (pos, ch) in text.chars().enumerate() {
        if ch == '\n' {
            close_segment(&mut open, &mut lines);
            lines.push(Vec::new());
            col = 0;
            continue;
        }

        while next < spans.len() && spans[next].end <= pos {
            next += 1;
        }
        let current = spans.get(next).filter(|s| s.contains(pos));
        let width = char_width(ch);

        match current {
            // Still inside the span the open segment started from
            Some(span) if span.start < pos && open.is_some() => {
                if let Some(seg) = open.as_mut() {
                    seg.columns.end = col + width;
                }
            }
            Some(span) => {
                close_segment(&mut open, &mut lines);
                open = Some(ColumnSpan {
                    columns: col..col + width,
                    category: span.category,
                });
            }
            None => close_segment(&mut open, &mut lines),
        }
        col += width;
    }

    close_segment(&mut open, &mut lines);
    lines
}

fn queue_style<W: Write>(out: &mut W, style: Style) -> Result<()> {
    if let Some(fg) = term_color(style.fg) {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = term_color(style.bg) {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

/// Write `text` with each span wrapped in its style, resetting after each
///
/// Spans that fall outside `text` are clamped to its end.
pub fn write_highlighted<W: Write>(
    out: &mut W,
    text: &str,
    annotations: &AnnotationSet,
    styles: &StyleMap,
) -> Result<()> {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();
    let byte_at = |pos: usize| bounds.get(pos).copied().unwrap_or(text.len());

    let mut printed = 0;
    for (span, style) in annotations.styled(styles) {
        let start = byte_at(span.start).max(printed);
        let end = byte_at(span.end);
        if start >= end {
            continue;
        }
        if printed < start {
            queue!(out, Print(&text[printed..start]))?;
        }
        queue_style(out, style)?;
        queue!(out, Print(&text[start..end]), SetAttribute(Attribute::Reset))?;
        printed = end;
    }
    if printed < text.len() {
        queue!(out, Print(&text[printed..]))?;
    }
    out.flush()?;
    Ok(())
}
