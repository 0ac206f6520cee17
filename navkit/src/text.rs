//! Terminal-column aware string helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Columns `s` occupies when rendered.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Shorten `s` to at most `max_width` columns, marking the cut with `…`.
/// Wide characters are never split.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let Some(room) = max_width.checked_sub(1) else {
        return String::new();
    };

    let mut used = 0;
    let mut out: String = s
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= room
        })
        .collect();
    out.push(ELLIPSIS);
    out
}
