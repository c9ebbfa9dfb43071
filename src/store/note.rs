//! The note record and its field types.

use chrono::{DateTime, Utc};

use crate::text::TextStats;

/// Unique note identifier, assigned from a monotonic counter.
///
/// Ids are never reused, even after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(u64);

impl NoteId {
    pub(super) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed note color palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteColor {
    #[default]
    Blue,
    Purple,
    Pink,
    Green,
    Yellow,
    Orange,
    Gray,
}

impl NoteColor {
    /// Every palette entry, in picker order.
    pub const ALL: [Self; 7] = [
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Gray,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Gray => "gray",
        }
    }
}

/// A single user-authored note.
///
/// `word_count` and `read_time` are derived from `content` and kept
/// consistent by the store; nothing outside [`super::NoteStore`] mutates a
/// note in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Markdown-subset source; rendered only through the content model.
    pub content: String,
    pub is_favorite: bool,
    /// Ordered, append-only; duplicates are allowed.
    pub tags: Vec<String>,
    pub color: NoteColor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub word_count: usize,
    pub read_time: usize,
}

impl Note {
    pub(super) fn new(id: NoteId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: "New note".to_string(),
            content: String::new(),
            is_favorite: false,
            tags: Vec::new(),
            color: NoteColor::default(),
            created_at: now,
            updated_at: now,
            word_count: 0,
            read_time: 0,
        }
    }

    /// Case-insensitive substring match against title, content source, or
    /// any tag.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.content.to_lowercase().contains(query_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(query_lower))
    }

    pub(super) fn refresh_stats(&mut self) {
        let stats = TextStats::of(&self.content);
        self.word_count = stats.word_count;
        self.read_time = stats.read_time;
    }
}

/// A partial note update, merged field-by-field by [`super::NoteStore::update`].
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub color: Option<NoteColor>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }
}
