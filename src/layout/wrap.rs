//! Fixed-column line wrapping.
//!
//! Wrapping counts characters, not glyph widths, and never looks for word
//! boundaries: a source line longer than the budget is cut into chunks of
//! exactly `max_columns` characters with a shorter remainder last.

/// Wrap a single source line.
///
/// A line of at most `max_columns` characters is returned unchanged. An empty
/// line yields one empty wrapped line so blank lines survive as spacing.
/// `max_columns` must be non-zero.
pub fn wrap_line(line: &str, max_columns: usize) -> Vec<String> {
    debug_assert!(max_columns > 0);

    if line.chars().count() <= max_columns {
        return vec![line.to_string()];
    }

    let mut chars = line.char_indices().map(|(i, _)| i).peekable();
    let mut out = Vec::new();
    let mut start = 0;
    let mut taken = 0;
    // Walk char boundaries so multi-byte text is never cut inside a code point.
    while let Some(idx) = chars.next() {
        if taken == max_columns {
            out.push(line[start..idx].to_string());
            start = idx;
            taken = 0;
        }
        taken += 1;
        if chars.peek().is_none() {
            out.push(line[start..].to_string());
        }
    }
    out
}

/// Wrap every line of `text` independently, in order.
///
/// Lines are split with [`str::lines`], so `\r\n` endings are accepted and a
/// trailing newline does not produce an extra blank line. Empty text yields
/// no lines at all.
pub fn wrap_text(text: &str, max_columns: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| wrap_line(line, max_columns))
        .collect()
}
