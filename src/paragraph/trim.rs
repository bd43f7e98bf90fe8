// src/paragraph/trim.rs

use super::patterns::LEADING_CONTENT;

/// Drops everything in front of the next paragraph.
///
/// Punctuation directly attached to an alphanumeric character is kept
/// (`"!word"`, `",.?word"`), whitespace and punctuation separated from the
/// next word by whitespace are dropped. With no alphanumeric character left
/// the result is empty.
pub fn trim_start(text: &str) -> &str {
    match LEADING_CONTENT.find(text) {
        Some(m) => &text[m.start()..],
        None => "",
    }
}

/// Drops trailing whitespace only; trailing punctuation belongs to the paragraph.
pub fn trim_end(text: &str) -> &str {
    text.trim_end_matches(char::is_whitespace)
}
