//! Paragraph splitting
//!
//! Splits a text into paragraph-sized chunks bounded by a main and a
//! secondary limit, preferring blank lines, newlines, sentence ends,
//! punctuation and spaces over a hard cut, and flags the chunks that contain
//! a search term.

pub mod errors;
pub mod finder;
pub mod patterns;
pub mod segmenter;
pub mod trim;

pub use errors::{SegmentError, SegmentResult};
pub use segmenter::split_and_search;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAIN_LIMIT: i64 = 1200;
pub const DEFAULT_SECONDARY_LIMIT: i64 = 800;

/// One chunk of the input. `start` and `length` count characters of the
/// original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub start: usize,
    pub length: usize,
    pub contains: bool,
}

impl Paragraph {
    pub fn new(text: &str, start: usize, search_term: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            start,
            length: text.chars().count(),
            contains: contains_term(text, search_term),
        }
    }

    /// Exclusive end offset in the original text
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// An empty or missing term never matches.
pub fn contains_term(text: &str, search_term: Option<&str>) -> bool {
    match search_term {
        Some(term) if !term.is_empty() => text.contains(term),
        _ => false,
    }
}

/// Validated split limits, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub main: usize,
    pub secondary: usize,
}

impl Limits {
    pub fn new(main_limit: i64, secondary_limit: i64) -> SegmentResult<Self> {
        const NOT_POSITIVE: &str = "The main and secondary limits must be greater than 0.";

        if main_limit <= 0 || secondary_limit <= 0 {
            return Err(SegmentError::InvalidArgument(NOT_POSITIVE));
        }
        if secondary_limit > main_limit {
            return Err(SegmentError::InvalidArgument(
                "The secondary limit can't be greater than the main limit.",
            ));
        }

        let main = usize::try_from(main_limit).map_err(|_| SegmentError::InvalidArgument(NOT_POSITIVE))?;
        let secondary =
            usize::try_from(secondary_limit).map_err(|_| SegmentError::InvalidArgument(NOT_POSITIVE))?;
        Ok(Self { main, secondary })
    }
}
