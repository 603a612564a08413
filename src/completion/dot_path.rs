//! Dotted identifier paths typed right before the cursor.

/// The trailing `[\w$.]` run before the cursor, split on dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath<'a> {
    /// Non-empty segments (`HR.EMP.` gives `["HR", "EMP"]`).
    pub segments: Vec<&'a str>,
    /// True when the run ends with `.`.
    pub ends_with_dot: bool,
}

impl<'a> DotPath<'a> {
    /// Reads the path ending at the cursor.
    pub fn before_cursor(text_before_cursor: &'a str) -> Self {
        let token = last_token(text_before_cursor);
        Self {
            segments: token.split('.').filter(|s| !s.is_empty()).collect(),
            ends_with_dot: token.ends_with('.'),
        }
    }
}

/// Returns the trailing run of identifier characters, `$` and `.`.
pub fn last_token(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '.')
        .last()
        .map_or(text.len(), |(pos, _)| pos);
    &text[start..]
}

/// Returns the partial identifier ending at the cursor (no dots).
pub fn word_before_cursor(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| ch.is_alphanumeric() || ch == '_')
        .last()
        .map_or(text.len(), |(pos, _)| pos);
    &text[start..]
}
