//! Error reporting helpers for the command-line binaries.
//!
//! Bracket errors point back into the original, unfiltered source text, so
//! the report shows a context window around the offending character with a
//! caret underneath. All positions are char indices; slicing converts to
//! byte indices so UTF-8 source (comments included) renders correctly.

use std::io::{self, Write};

use crate::BrainfuckError;

/// Chars shown on each side of the caret position.
const WINDOW_CHARS: usize = 32;

/// Render a context window over `source` centered on char offset `pos`:
/// the excerpt line followed by a caret line pointing at the character.
pub fn render_source_context(source: &str, pos: usize) -> (String, String) {
    let total_chars = source.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(source, start_char);
    let end_byte = char_to_byte_index(source, end_char);
    let excerpt = source[start_byte..end_byte].to_string();

    let caret = format!("{}^", " ".repeat(pos.saturating_sub(start_char)));
    (excerpt, caret)
}

/// Print `err` to stderr, prefixed with the program name. Unmatched-bracket
/// errors additionally get the caret context window over `source`.
pub fn report_error(program: &str, source: &str, err: &BrainfuckError) {
    eprintln!("{program}: {err}");
    if let BrainfuckError::UnmatchedBracket { position, .. } = err {
        let (excerpt, caret) = render_source_context(source, *position);
        eprintln!("  {excerpt}");
        eprintln!("  {caret}");
    }
    let _ = io::stderr().flush();
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}
