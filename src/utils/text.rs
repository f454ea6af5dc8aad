//! Text cleanup for terminal display.
//!
//! Chat messages are user-controlled. Before they are drawn in the terminal,
//! escape sequences and control characters are removed so a message cannot move
//! the cursor, recolor the screen or ring the bell.

/// Remove ANSI CSI sequences (`ESC [ ... letter`) and control characters,
/// keeping tabs and line breaks.
pub fn strip_control_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }
        out.push(ch);
    }

    out
}

/// Sanitize and fold line breaks into spaces for single-row list items
pub fn single_line(text: &str) -> String {
    strip_control_sequences(text)
        .split(['\n', '\r'])
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
