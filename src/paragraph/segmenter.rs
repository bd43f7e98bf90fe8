// src/paragraph/segmenter.rs

use super::finder::{blank_line, Window, CASCADE};
use super::trim::{trim_end, trim_start};
use super::{Limits, Paragraph, SegmentError, SegmentResult};

/// Splits `text` into paragraphs and flags those containing `search_term`.
///
/// Each iteration picks the first split point that applies, in this order:
/// a blank line before the main limit, the whole rest when it is shorter than
/// the main limit, then a newline, a sentence-ending dot, a punctuation mark
/// and a space inside the secondary..main window (or the last one before the
/// secondary limit), and finally a hard cut at the main limit.
///
/// Fails before processing anything when `text` is `None`, when a limit is
/// not positive, or when the secondary limit exceeds the main limit.
pub fn split_and_search(
    text: Option<&str>,
    search_term: Option<&str>,
    main_limit: i64,
    secondary_limit: i64,
) -> SegmentResult<Vec<Paragraph>> {
    tracing::debug!(main_limit, secondary_limit, search_term = ?search_term, "split and search");

    let text = text.ok_or(SegmentError::NullArgument("The text can't be null"))?;
    let limits = Limits::new(main_limit, secondary_limit)?;

    let mut remaining = Remaining::new(text);
    let mut paragraphs = Vec::new();

    while !remaining.is_empty() {
        let buffer = remaining.as_str();
        let window = Window::over(buffer, limits);

        let main_end = window.map_or(buffer.len(), |w| w.main_end);
        if let Some(split) = blank_line(buffer, main_end) {
            paragraphs.push(remaining.take(split, search_term, "blank_line"));
            continue;
        }

        let Some(window) = window else {
            paragraphs.push(remaining.take(buffer.len(), search_term, "remainder"));
            break;
        };

        let (kind, split) = CASCADE
            .iter()
            .find_map(|finder| finder.find(buffer, window).map(|split| (finder.name(), split)))
            .unwrap_or(("hard_cut", window.main_end));
        paragraphs.push(remaining.take(split, search_term, kind));
    }

    Ok(paragraphs)
}

/// Unconsumed tail of the input and its character offset in the original text.
#[derive(Debug)]
struct Remaining<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> Remaining<'a> {
    fn new(text: &'a str) -> Self {
        let mut remaining = Self {
            rest: trim_end(text),
            offset: 0,
        };
        remaining.skip_noise();
        remaining
    }

    fn as_str(&self) -> &'a str {
        self.rest
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consumes `bytes` bytes, returns the number of characters consumed.
    fn advance(&mut self, bytes: usize) -> usize {
        let (consumed, rest) = self.rest.split_at(bytes);
        let chars = consumed.chars().count();
        self.offset += chars;
        self.rest = rest;
        chars
    }

    fn skip_noise(&mut self) -> usize {
        let removed = self.rest.len() - trim_start(self.rest).len();
        self.advance(removed)
    }

    /// Turns the first `split` bytes into a paragraph, then drops the noise
    /// in front of the next one.
    fn take(&mut self, split: usize, search_term: Option<&str>, kind: &'static str) -> Paragraph {
        let paragraph = Paragraph::new(trim_end(&self.rest[..split]), self.offset, search_term);
        debug_assert!(!paragraph.text.is_empty());

        let consumed = self.advance(split) + self.skip_noise();
        tracing::debug!(
            kind,
            split,
            offset = paragraph.start,
            length = paragraph.length,
            consumed,
            "new paragraph"
        );
        paragraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_starts_at_first_content() {
        let remaining = Remaining::new(" \t\n wholeText \t\n ");
        assert_eq!(remaining.as_str(), "wholeText");
        assert_eq!(remaining.offset, 4);
    }

    #[test]
    fn test_remaining_noise_only_is_empty() {
        let remaining = Remaining::new(". \t,?\n\n. ,\n!!");
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_take_advances_past_separator_noise() {
        let mut remaining = Remaining::new("paragraph1 \n \t \n paragraph2");
        let paragraph = remaining.take(11, None, "blank_line");
        assert_eq!(paragraph.text, "paragraph1");
        assert_eq!(paragraph.length, 10);
        assert_eq!(remaining.offset, 17);
        assert_eq!(remaining.as_str(), "paragraph2");
    }

    #[test]
    fn test_offsets_count_characters() {
        let mut remaining = Remaining::new("  żółw. kot");
        assert_eq!(remaining.offset, 2);
        let paragraph = remaining.take("żółw.".len(), None, "dot");
        assert_eq!(paragraph.length, 5);
        assert_eq!(remaining.offset, 8);
    }

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_paragraph_event_logs_split_index() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let paragraphs = split_and_search(Some("one two three"), None, 7, 5).unwrap();
            assert_eq!(paragraphs[0].text, "one");
        });

        let output = String::from_utf8_lossy(&capture.0.lock()).to_string();
        let event = output
            .lines()
            .find(|line| line.contains("new paragraph"))
            .expect("paragraph event logged");
        assert!(event.contains("space"), "{event}");
        assert!(event.contains("split=3"), "{event}");
        assert!(event.contains("offset=0"), "{event}");
    }

    #[test]
    fn test_null_text_checked_before_limits() {
        assert!(matches!(
            split_and_search(None, Some(""), 8, 12),
            Err(SegmentError::NullArgument(_))
        ));
    }
}
