use std::time::{Duration, Instant};

use honyaku_config::FontRange;

use crate::font::auto_font_size;

const SEPARATOR: &str = "\n\n";

/// Accumulated translations of one watch session.
///
/// Appends close together are joined with a blank line; after
/// `reset_after` without an append the history starts over.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    text: String,
    last_append: Option<Instant>,
    reset_after: Duration,
}

impl HistoryBuffer {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            text: String::new(),
            last_append: None,
            reset_after,
        }
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.last_append = None;
    }

    pub fn append(&mut self, text: &str) -> bool {
        self.append_at(text, Instant::now())
    }

    /// Returns `false` when `text` is blank and nothing changed
    pub fn append_at(&mut self, text: &str, now: Instant) -> bool {
        let clean = text.trim();
        if clean.is_empty() {
            return false;
        }

        let expired = self
            .last_append
            .is_some_and(|last| now.saturating_duration_since(last) >= self.reset_after);
        if expired {
            self.reset();
        }

        if !self.text.is_empty() {
            self.text.push_str(SEPARATOR);
        }
        self.text.push_str(clean);
        self.last_append = Some(now);
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn last_append(&self) -> Option<Instant> {
        self.last_append
    }

    pub fn font_size(&self, range: FontRange) -> u32 {
        auto_font_size(&self.text, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_close_appends_are_joined() {
        let start = Instant::now();
        let mut history = HistoryBuffer::new(WINDOW);

        assert!(history.append_at("first", start));
        assert!(history.append_at("second", start + Duration::from_secs(59)));
        assert_eq!(history.text(), "first\n\nsecond");
    }

    #[test]
    fn test_gap_clears_history() {
        let start = Instant::now();
        let mut history = HistoryBuffer::new(WINDOW);

        history.append_at("first", start);
        history.append_at("second", start + WINDOW);
        assert_eq!(history.text(), "second");
        assert_eq!(history.last_append(), Some(start + WINDOW));
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let start = Instant::now();
        let mut history = HistoryBuffer::new(WINDOW);

        history.append_at("  kept  ", start);
        assert!(!history.append_at("   \n", start + Duration::from_secs(1)));
        assert_eq!(history.text(), "kept");
        assert_eq!(history.last_append(), Some(start));
    }

    #[test]
    fn test_reset_forgets_timestamp() {
        let start = Instant::now();
        let mut history = HistoryBuffer::new(WINDOW);

        history.append_at("first", start);
        history.reset();
        assert!(history.is_empty());
        assert!(history.last_append().is_none());

        history.append_at("again", start + Duration::from_secs(1));
        assert_eq!(history.text(), "again");
    }

    #[test]
    fn test_font_shrinks_with_history() {
        let start = Instant::now();
        let range = FontRange::new(12, 24);
        let mut history = HistoryBuffer::new(WINDOW);
        assert_eq!(history.font_size(range), 24);

        history.append_at(&"a".repeat(40), start);
        assert_eq!(history.font_size(range), 20);
        history.append_at(&"b".repeat(200), start + Duration::from_secs(1));
        assert_eq!(history.font_size(range), 12);
    }
}
