//! Text utilities derived from note content: word statistics, the naive
//! summarizer, and relative date formatting.

mod dates;
mod stats;
mod summary;

pub use dates::format_relative;
pub use stats::TextStats;
pub use summary::summarize;
