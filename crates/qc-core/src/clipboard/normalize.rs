//! Canonical comparison key for clipboard text.
//!
//! The key is only ever used to decide whether two texts are "the same
//! copy". Stored and displayed text is always the raw value.

use std::fmt;

/// Whitespace/null-stripped, case-folded form of a clipboard text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce raw clipboard text to its comparison key.
///
/// Drops every whitespace character (including the ASCII information
/// separators U+001C..U+001F) and every NUL, then lowercases the rest.
pub fn normalize(text: &str) -> NormalizedText {
    NormalizedText(
        text.chars()
            .filter(|c| !is_ignored(*c))
            .flat_map(char::to_lowercase)
            .collect(),
    )
}

fn is_ignored(c: char) -> bool {
    c.is_whitespace() || c == '\0' || ('\u{1c}'..='\u{1f}').contains(&c)
}
