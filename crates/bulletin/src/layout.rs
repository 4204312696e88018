//! Line helpers for the 80-column bordered document.
//!
//! Widths are visible terminal columns (unicode-width), not bytes or chars, so `°`, `―`
//! and accented month names pad correctly.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

pub const DOCUMENT_WIDTH: usize = 80;
/// Columns between the two border characters.
pub const INNER_WIDTH: usize = DOCUMENT_WIDTH - 2;

pub fn visible_width(text: &str) -> usize {
    text.width()
}

/// Cut `text` to at most `width` columns without splitting a wide character.
///
/// Prefixes are measured as whole strings: a character and the selector after it
/// (`☀` + U+FE0F) can be wider together than apart.
pub fn truncate(text: &str, width: usize) -> &str {
    for (idx, ch) in text.char_indices() {
        if text[..idx + ch.len_utf8()].width() > width {
            return &text[..idx];
        }
    }
    text
}

/// Control characters other than newline become spaces.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Left-align in exactly `width` columns, truncating overflow.
pub fn pad_right(text: &str, width: usize) -> String {
    let text = sanitize(text);
    let text = truncate(&text, width);
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

/// Right-align in exactly `width` columns, truncating overflow.
pub fn pad_left(text: &str, width: usize) -> String {
    let text = sanitize(text);
    let text = truncate(&text, width);
    format!("{}{}", " ".repeat(width.saturating_sub(text.width())), text)
}

/// Center in exactly `width` columns; an odd leftover space goes to the right.
pub fn center(text: &str, width: usize) -> String {
    let text = sanitize(text);
    let text = truncate(&text, width);
    let spare = width.saturating_sub(text.width());
    let left = spare / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(spare - left))
}

/// `+====...====+`
pub fn rule(fill: char) -> String {
    format!("+{}+", fill.to_string().repeat(INNER_WIDTH))
}

/// `|content   ...   |`
pub fn boxed(content: &str) -> String {
    format!("|{}|", pad_right(content, INNER_WIDTH))
}

pub fn boxed_center(content: &str) -> String {
    format!("|{}|", center(content, INNER_WIDTH))
}

pub fn boxed_blank() -> String {
    boxed("")
}
