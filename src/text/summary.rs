//! Naive two-sentence summarizer.

/// How many leading sentences the summary keeps.
const SUMMARY_SENTENCES: usize = 2;

/// Summarize note content by taking its first two sentences.
///
/// Markup is stripped first; the remaining text is split on
/// sentence-terminal punctuation (`.`, `!`, `?`), empty fragments are
/// discarded, and the first two survivors are joined with `". "` plus a
/// trailing period. Content with no sentences yields just `"."`.
pub fn summarize(content: &str) -> String {
    let text = crate::content::plain_text(content);
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(SUMMARY_SENTENCES)
        .collect();
    let mut summary = sentences.join(". ");
    summary.push('.');
    summary
}
