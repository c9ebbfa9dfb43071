//! Relative date formatting for the note list.

use chrono::{DateTime, Utc};

/// Format a timestamp relative to `now`.
///
/// Returns `"today"` for a zero whole-day delta, `"yesterday"` for one day,
/// `"N days ago"` up to six days, and a short date (`5 Jan`) beyond that.
///
/// The delta truncates the elapsed time to whole days rather than comparing
/// calendar dates, so a note edited late yesterday can still read "today"
/// depending on the current time of day. Timestamps ahead of `now` clamp
/// to "today".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - timestamp).num_days();
    match days {
        i64::MIN..=0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => timestamp.format("%-d %b").to_string(),
    }
}
