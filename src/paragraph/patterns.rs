// src/paragraph/patterns.rs
//
// Compiled once on first use and shared read-only afterwards.
// Alphanumeric means any Unicode letter or number; punctuation is anything
// that is neither alphanumeric nor whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Two newlines with no alphanumeric character between them.
pub static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[^\p{L}\p{N}]*\n").expect("valid blank line pattern"));

/// Shortest span from an alphanumeric character to the next period on the
/// same line. Any line terminator ends the line, not only `\n`.
pub static DOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}][^\n\r\u{85}\u{2028}\u{2029}]*?\.").expect("valid dot pattern")
});

/// A single punctuation character.
pub static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid punctuation pattern"));

/// Punctuation attached to the following alphanumeric character.
pub static LEADING_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s]*[\p{L}\p{N}]").expect("valid leading content pattern")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_skips_noise() {
        let m = BLANK_LINE.find("a \n!\t,\n b").unwrap();
        assert_eq!(m.start(), 2);
        assert_eq!(m.end(), 7);
        assert!(BLANK_LINE.find("a\nb\nc").is_none());
    }

    #[test]
    fn test_dot_is_lazy_and_needs_alphanumeric() {
        let ends: Vec<usize> = DOT.find_iter("123.567890.2").map(|m| m.end()).collect();
        assert_eq!(ends, vec![4, 11]);
        assert!(DOT.find("..,.").is_none());
    }

    #[test]
    fn test_dot_does_not_cross_newline() {
        assert!(DOT.find("abc\n.").is_none());
    }

    #[test]
    fn test_dot_does_not_cross_other_line_terminators() {
        for text in ["abc\r.", "abc\u{85}.", "abc\u{2028}.", "abc\u{2029}."] {
            assert!(DOT.find(text).is_none(), "{text:?}");
        }
        assert_eq!(DOT.find("\rabc.").map(|m| m.end()), Some(5));
    }

    #[test]
    fn test_punctuation_classes() {
        for ch in ["_", "?", ",", "!", "\"", "«"] {
            assert!(PUNCTUATION.is_match(ch), "{ch} should be punctuation");
        }
        for ch in ["a", "7", " ", "\t", "\n", "é"] {
            assert!(!PUNCTUATION.is_match(ch), "{ch:?} should not be punctuation");
        }
    }

    #[test]
    fn test_leading_content_requires_adjacent_alphanumeric() {
        assert_eq!(LEADING_CONTENT.find(",, \t ,.?word").unwrap().start(), 5);
        assert!(LEADING_CONTENT.find(". ,\n!!").is_none());
    }
}
