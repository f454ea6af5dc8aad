//! Preview window extraction and highlight markup.
//!
//! Previews are built from a copy of the message text; the transcript itself is
//! never rewritten. Markers are plain strings so any frontend can render them.
//!
//! A preview is markup: `&` and `<` from the message are escaped as `&amp;` and
//! `&lt;`, so the only `<` left in a preview starts a highlight marker. Use
//! [`split_highlights`], [`strip_markers`] or [`unescape`] to get text back.

use std::borrow::Cow;
use std::ops::Range;

use super::matcher::Matcher;

pub const ELLIPSIS: &str = "...";
pub const HIGHLIGHT_OPEN: &str = "<mark>";
pub const HIGHLIGHT_CLOSE: &str = "</mark>";
const ESCAPED_AMP: &str = "&amp;";
const ESCAPED_LT: &str = "&lt;";

/// Escape message text for inclusion in a preview
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str(ESCAPED_AMP),
            '<' => out.push_str(ESCAPED_LT),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape`]. Markers are left in place.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix(ESCAPED_LT) {
            out.push('<');
            rest = after;
        } else if let Some(after) = tail.strip_prefix(ESCAPED_AMP) {
            out.push('&');
            rest = after;
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Byte offset reached by stepping back `count` chars from `pos`
fn retreat_chars(text: &str, pos: usize, count: usize) -> usize {
    text[..pos].char_indices().rev().take(count).last().map_or(pos, |(i, _)| i)
}

/// Byte offset reached by stepping forward `count` chars from `pos`
fn advance_chars(text: &str, pos: usize, count: usize) -> usize {
    text[pos..].char_indices().nth(count).map_or(text.len(), |(i, _)| pos + i)
}

/// Build the preview for a message whose first match is at `first`.
///
/// The window spans `radius` chars on each side of the match. Ellipses mark
/// truncated ends. With a `highlighter`, every non-overlapping occurrence
/// within the window (not the full text) is wrapped in highlight markers.
pub fn build_preview(
    text: &str,
    first: Range<usize>,
    radius: usize,
    highlighter: Option<&Matcher>,
) -> String {
    let start = retreat_chars(text, first.start, radius);
    let end = advance_chars(text, first.end, radius);
    let window = &text[start..end];

    let mut preview = String::with_capacity(window.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        preview.push_str(ELLIPSIS);
    }
    match highlighter {
        Some(matcher) => preview.push_str(&highlight(window, matcher)),
        None => preview.push_str(&escape(window)),
    }
    if end < text.len() {
        preview.push_str(ELLIPSIS);
    }
    preview
}

/// Escape `text` and wrap every occurrence of the matcher's query with markers
pub fn highlight(text: &str, matcher: &Matcher) -> String {
    let ranges = matcher.find_all(text);
    if ranges.is_empty() {
        return escape(text).into_owned();
    }

    let mut out = String::with_capacity(
        text.len() + ranges.len() * (HIGHLIGHT_OPEN.len() + HIGHLIGHT_CLOSE.len()),
    );
    let mut cursor = 0;
    for range in ranges {
        out.push_str(&escape(&text[cursor..range.start]));
        out.push_str(HIGHLIGHT_OPEN);
        out.push_str(&escape(&text[range.clone()]));
        out.push_str(HIGHLIGHT_CLOSE);
        cursor = range.end;
    }
    out.push_str(&escape(&text[cursor..]));
    out
}

/// Head-truncate `text` to `max_chars` characters, appending an ellipsis
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", escape(&text[..cut]), ELLIPSIS),
        None => escape(text).into_owned(),
    }
}

/// Split a preview into unescaped `(segment, highlighted)` pairs, dropping the markers
pub fn split_highlights(preview: &str) -> Vec<(Cow<'_, str>, bool)> {
    let mut segments = Vec::new();
    let mut rest = preview;

    while let Some(open) = rest.find(HIGHLIGHT_OPEN) {
        let after_open = &rest[open + HIGHLIGHT_OPEN.len()..];
        let Some(close) = after_open.find(HIGHLIGHT_CLOSE) else {
            break;
        };
        if open > 0 {
            segments.push((unescape(&rest[..open]), false));
        }
        segments.push((unescape(&after_open[..close]), true));
        rest = &after_open[close + HIGHLIGHT_CLOSE.len()..];
    }
    if !rest.is_empty() {
        segments.push((unescape(rest), false));
    }
    segments
}

/// Remove ellipsis and highlight markers, recovering the raw window text
pub fn strip_markers(preview: &str) -> String {
    let body = preview.strip_prefix(ELLIPSIS).unwrap_or(preview);
    let body = body.strip_suffix(ELLIPSIS).unwrap_or(body);
    split_highlights(body).into_iter().map(|(segment, _)| segment).collect()
}
