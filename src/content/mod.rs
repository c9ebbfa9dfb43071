//! Note-content model.
//!
//! Content is stored as a small markdown subset and parsed into a
//! [`Document`] of rendered lines through an explicit allow-list
//! (paragraphs, lists, bold / italic / underline). Raw HTML never
//! survives parsing, so display code has no raw-markup path at all.

mod parser;
mod types;

pub use parser::plain_text;
pub use types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};
