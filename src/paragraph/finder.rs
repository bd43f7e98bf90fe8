// src/paragraph/finder.rs
//
// Split-point strategies. Every index handled here is a byte offset into the
// current buffer; character limits are turned into byte bounds by `Window`.

use regex::Regex;

use super::patterns::{BLANK_LINE, DOT, PUNCTUATION};
use super::Limits;

/// Byte bounds of the first `main` and first `secondary` characters of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub main_end: usize,
    pub secondary_end: usize,
}

impl Window {
    /// `None` when the buffer is shorter than the main limit.
    pub fn over(buffer: &str, limits: Limits) -> Option<Self> {
        let main_end = byte_offset(buffer, limits.main)?;
        let secondary_end = byte_offset(&buffer[..main_end], limits.secondary)?;
        Some(Self {
            main_end,
            secondary_end,
        })
    }
}

/// Byte offset of the `chars`-th character, or `None` past the end.
pub fn byte_offset(text: &str, chars: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(chars)
}

/// Keeps `index` only when it lies before `bound`.
pub fn in_range(index: Option<usize>, bound: usize) -> Option<usize> {
    index.filter(|&i| i < bound)
}

/// Start of the first blank line, searched over the whole buffer.
pub fn blank_line(buffer: &str, main_end: usize) -> Option<usize> {
    in_range(BLANK_LINE.find(buffer).map(|m| m.start()), main_end)
}

/// Windowed separators, tried in declaration order once the buffer is at
/// least `main` characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitFinder {
    Newline,
    Dot,
    Punctuation,
    Space,
}

pub const CASCADE: [SplitFinder; 4] = [
    SplitFinder::Newline,
    SplitFinder::Dot,
    SplitFinder::Punctuation,
    SplitFinder::Space,
];

impl SplitFinder {
    pub fn name(&self) -> &'static str {
        match self {
            SplitFinder::Newline => "newline",
            SplitFinder::Dot => "dot",
            SplitFinder::Punctuation => "punctuation",
            SplitFinder::Space => "space",
        }
    }

    /// Literal separators split before the separator, patterns after the match.
    pub fn find(&self, buffer: &str, window: Window) -> Option<usize> {
        match self {
            SplitFinder::Newline => character_matching('\n', buffer, window),
            SplitFinder::Dot => pattern_matching(&DOT, buffer, window),
            SplitFinder::Punctuation => pattern_matching(&PUNCTUATION, buffer, window),
            SplitFinder::Space => character_matching(' ', buffer, window),
        }
    }
}

fn character_matching(separator: char, buffer: &str, window: Window) -> Option<usize> {
    let Window {
        main_end,
        secondary_end,
    } = window;

    // first separator between the secondary and the main bound
    let first = buffer[secondary_end..main_end]
        .find(separator)
        .map(|i| secondary_end + i);
    if let Some(index) = in_range(first, main_end) {
        tracing::trace!(index, separator = ?separator, "first character match in window");
        return Some(index);
    }

    // last separator at or before the secondary bound
    let last = if buffer[secondary_end..].starts_with(separator) {
        Some(secondary_end)
    } else {
        buffer[..secondary_end].rfind(separator)
    };
    let index = in_range(last, secondary_end);
    if index.is_some() {
        tracing::trace!(index = ?index, separator = ?separator, "last character match before secondary bound");
    }
    index
}

fn pattern_matching(pattern: &Regex, buffer: &str, window: Window) -> Option<usize> {
    let Window {
        main_end,
        secondary_end,
    } = window;

    let first = pattern
        .find_iter(&buffer[..main_end])
        .map(|m| m.end())
        .find(|&end| end >= secondary_end);
    if let Some(index) = in_range(first, main_end) {
        tracing::trace!(index, pattern = pattern.as_str(), "first pattern match in window");
        return Some(index);
    }

    let last = pattern
        .find_iter(&buffer[..secondary_end])
        .map(|m| m.end())
        .last();
    let index = in_range(last, secondary_end);
    if index.is_some() {
        tracing::trace!(index = ?index, pattern = pattern.as_str(), "last pattern match before secondary bound");
    }
    index
}
