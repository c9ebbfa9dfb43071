//! Derived text statistics.

/// Reading speed used for the read-time estimate, in words per minute.
const WORDS_PER_MINUTE: usize = 200;

/// Word count and estimated read time for a note body.
///
/// Recomputed inside the store whenever content changes, so the stored
/// values are never stale relative to the content they describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of whitespace-separated words in the stripped text.
    pub word_count: usize,
    /// Estimated minutes to read, rounded up. Zero for empty content.
    pub read_time: usize,
}

impl TextStats {
    /// Compute statistics for note content (markdown-subset source).
    pub fn of(content: &str) -> Self {
        let text = crate::content::plain_text(content);
        let word_count = text.split_whitespace().count();
        let read_time = word_count.div_ceil(WORDS_PER_MINUTE);
        Self {
            word_count,
            read_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_words_one_minute() {
        let stats = TextStats::of("Hello world");
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.read_time, 1);
    }

    #[test]
    fn test_empty_content_is_zero() {
        let stats = TextStats::of("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.read_time, 0);
    }

    #[test]
    fn test_whitespace_only_is_zero() {
        let stats = TextStats::of("   \n\n\t  ");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.read_time, 0);
    }

    #[test]
    fn test_markup_does_not_count() {
        // "**bold** and *italic*" strips to three words.
        let stats = TextStats::of("**bold** and *italic*");
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn test_list_markers_do_not_count() {
        let stats = TextStats::of("- one\n- two\n- three");
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn test_read_time_rounds_up() {
        let content = "word ".repeat(201);
        let stats = TextStats::of(&content);
        assert_eq!(stats.word_count, 201);
        assert_eq!(stats.read_time, 2);
    }

    #[test]
    fn test_exactly_two_hundred_words() {
        let content = "word ".repeat(200);
        assert_eq!(TextStats::of(&content).read_time, 1);
    }
}
