//! The in-memory note collection and selection.
//!
//! All note mutation funnels through [`NoteStore`] so that `updated_at`
//! stamping and word-count recomputation can never be skipped. State is
//! transient by design: nothing here touches the filesystem.

mod note;

pub use note::{Note, NoteColor, NoteId, NotePatch};

use chrono::Utc;
use tracing::debug;

/// Ordered collection of notes plus the current selection.
///
/// Notes are newest-first: `create` prepends. Selection is held by id, so
/// views always observe the live record rather than a stale copy.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    next_id: u64,
    selected: Option<NoteId>,
}

impl NoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the welcome note, selected.
    pub fn with_welcome_note() -> Self {
        let mut store = Self::new();
        let id = store.create();
        store.update(
            id,
            NotePatch {
                title: Some("Welcome to Jotter".to_string()),
                content: Some(
                    "This scratchpad keeps short **rich-text** notes with tags, \
                     colors and favorites. Try the formatting commands!\n\n\
                     - `Ctrl+B` bold, `Ctrl+I` italic, `Ctrl+U` underline\n\
                     - `Ctrl+L` bullet list, `Ctrl+O` numbered list\n\n\
                     Everything lives in memory and vanishes on exit."
                        .to_string(),
                ),
                is_favorite: Some(true),
                tags: Some(vec!["important".to_string()]),
                ..NotePatch::default()
            },
        );
        store
    }

    /// Insert a new note with default field values at the front of the
    /// collection and select it. Always succeeds.
    pub fn create(&mut self) -> NoteId {
        let id = NoteId::new(self.next_id);
        self.next_id += 1;
        let note = Note::new(id, Utc::now());
        self.notes.insert(0, note);
        self.selected = Some(id);
        debug!(%id, "note created");
        id
    }

    /// Merge `patch` into the note matching `id` and stamp `updated_at`.
    ///
    /// Word count and read time are recomputed atomically when the patch
    /// carries content. Unknown ids are a silent no-op.
    pub fn update(&mut self, id: NoteId, patch: NotePatch) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!(%id, "update ignored: unknown note");
            return;
        };
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
            note.refresh_stats();
        }
        if let Some(is_favorite) = patch.is_favorite {
            note.is_favorite = is_favorite;
        }
        if let Some(tags) = patch.tags {
            note.tags = tags;
        }
        if let Some(color) = patch.color {
            note.color = color;
        }
        note.updated_at = Utc::now();
    }

    /// Remove the note matching `id`.
    ///
    /// If it was selected, selection moves to the first remaining note, or
    /// to none when the collection empties. Unknown ids are a no-op.
    pub fn delete(&mut self, id: NoteId) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return;
        }
        debug!(%id, remaining = self.notes.len(), "note deleted");
        if self.selected == Some(id) {
            self.selected = self.notes.first().map(|note| note.id);
        }
    }

    /// Flip the favorite flag.
    pub fn toggle_favorite(&mut self, id: NoteId) {
        let Some(is_favorite) = self.get(id).map(|note| note.is_favorite) else {
            return;
        };
        self.update(
            id,
            NotePatch {
                is_favorite: Some(!is_favorite),
                ..NotePatch::default()
            },
        );
    }

    /// Set the note color. The enum keeps callers inside the palette.
    pub fn set_color(&mut self, id: NoteId, color: NoteColor) {
        self.update(
            id,
            NotePatch {
                color: Some(color),
                ..NotePatch::default()
            },
        );
    }

    /// Append a trimmed tag. Empty or whitespace-only input is rejected;
    /// duplicates are kept as-is.
    ///
    /// Returns whether the tag was added.
    pub fn add_tag(&mut self, id: NoteId, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(mut tags) = self.get(id).map(|note| note.tags.clone()) else {
            return false;
        };
        tags.push(trimmed.to_string());
        self.update(
            id,
            NotePatch {
                tags: Some(tags),
                ..NotePatch::default()
            },
        );
        true
    }

    /// Notes matching `query` (case-insensitive substring against title,
    /// content, or any tag), preserving collection order. An empty query
    /// matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Note> {
        let query_lower = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| query_lower.is_empty() || note.matches(&query_lower))
            .collect()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub const fn selected_id(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Select the note matching `id`. Unknown ids leave selection alone.
    pub fn select(&mut self, id: NoteId) {
        if self.get(id).is_some() {
            self.selected = Some(id);
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_prepends_and_selects() {
        let mut store = NoteStore::new();
        let first = store.create();
        let second = store.create();
        assert_eq!(store.notes()[0].id, second);
        assert_eq!(store.notes()[1].id, first);
        assert_eq!(store.selected_id(), Some(second));
    }

    #[test]
    fn test_new_note_defaults() {
        let mut store = NoteStore::new();
        let id = store.create();
        let note = store.get(id).unwrap();
        assert_eq!(note.title, "New note");
        assert_eq!(note.content, "");
        assert!(!note.is_favorite);
        assert!(note.tags.is_empty());
        assert_eq!(note.color, NoteColor::Blue);
        assert_eq!(note.word_count, 0);
        assert_eq!(note.read_time, 0);
    }

    #[test]
    fn test_ids_are_unique_and_never_reused() {
        let mut store = NoteStore::new();
        let a = store.create();
        store.delete(a);
        let b = store.create();
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_title_round_trip() {
        let mut store = NoteStore::new();
        let id = store.create();
        let created_at = store.get(id).unwrap().created_at;
        store.update(id, NotePatch::title("X"));
        let note = store.get(id).unwrap();
        assert_eq!(note.title, "X");
        assert!(note.updated_at >= created_at);
    }

    #[test]
    fn test_update_content_refreshes_stats() {
        let mut store = NoteStore::new();
        let id = store.create();
        store.update(id, NotePatch::content("Hello world"));
        let note = store.get(id).unwrap();
        assert_eq!(note.word_count, 2);
        assert_eq!(note.read_time, 1);

        store.update(id, NotePatch::content(""));
        let note = store.get(id).unwrap();
        assert_eq!(note.word_count, 0);
        assert_eq!(note.read_time, 0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = NoteStore::new();
        let id = store.create();
        store.delete(id);
        store.update(id, NotePatch::title("ghost"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_selected_moves_selection_to_first() {
        let mut store = NoteStore::new();
        let oldest = store.create();
        let middle = store.create();
        let newest = store.create();
        store.select(middle);
        store.delete(middle);
        // Remaining order is newest-first; selection lands on the head.
        assert_eq!(store.selected_id(), Some(newest));
        assert_eq!(store.len(), 2);
        assert!(store.get(oldest).is_some());
    }

    #[test]
    fn test_delete_unselected_keeps_selection() {
        let mut store = NoteStore::new();
        let first = store.create();
        let second = store.create();
        store.delete(first);
        assert_eq!(store.selected_id(), Some(second));
    }

    #[test]
    fn test_delete_last_note_clears_selection() {
        let mut store = NoteStore::new();
        let id = store.create();
        store.delete(id);
        assert_eq!(store.selected_id(), None);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_toggle_favorite_flips() {
        let mut store = NoteStore::new();
        let id = store.create();
        store.toggle_favorite(id);
        assert!(store.get(id).unwrap().is_favorite);
        store.toggle_favorite(id);
        assert!(!store.get(id).unwrap().is_favorite);
    }

    #[test]
    fn test_set_color() {
        let mut store = NoteStore::new();
        let id = store.create();
        store.set_color(id, NoteColor::Pink);
        assert_eq!(store.get(id).unwrap().color, NoteColor::Pink);
    }

    #[test]
    fn test_add_tag_trims_and_appends() {
        let mut store = NoteStore::new();
        let id = store.create();
        assert!(store.add_tag(id, "  work  "));
        assert_eq!(store.get(id).unwrap().tags, vec!["work"]);
    }

    #[test]
    fn test_add_tag_rejects_blank() {
        let mut store = NoteStore::new();
        let id = store.create();
        assert!(!store.add_tag(id, ""));
        assert!(!store.add_tag(id, "   "));
        assert!(store.get(id).unwrap().tags.is_empty());
    }

    #[test]
    fn test_add_tag_keeps_duplicates() {
        let mut store = NoteStore::new();
        let id = store.create();
        store.add_tag(id, "todo");
        store.add_tag(id, "todo");
        assert_eq!(store.get(id).unwrap().tags, vec!["todo", "todo"]);
    }

    #[test]
    fn test_filter_empty_query_returns_all_in_order() {
        let mut store = NoteStore::new();
        store.create();
        store.create();
        store.create();
        let all = store.filter("");
        assert_eq!(all.len(), 3);
        let ids: Vec<_> = all.iter().map(|note| note.id).collect();
        let expected: Vec<_> = store.notes().iter().map(|note| note.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_filter_matches_title_content_and_tags() {
        let mut store = NoteStore::new();
        let by_tag = store.create();
        store.add_tag(by_tag, "groceries");
        let by_content = store.create();
        store.update(by_content, NotePatch::content("buy **milk** today"));
        let by_title = store.create();
        store.update(by_title, NotePatch::title("Milk run"));
        let miss = store.create();
        store.update(miss, NotePatch::title("Unrelated"));

        let hits = store.filter("MILK");
        let ids: Vec<_> = hits.iter().map(|note| note.id).collect();
        assert_eq!(ids, vec![by_title, by_content]);

        let tag_hits = store.filter("grocer");
        assert_eq!(tag_hits.len(), 1);
        assert_eq!(tag_hits[0].id, by_tag);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let mut store = NoteStore::new();
        for i in 0..5 {
            let id = store.create();
            store.update(id, NotePatch::title(format!("note {i}")));
        }
        let hits = store.filter("note");
        let positions: Vec<_> = hits
            .iter()
            .map(|hit| {
                store
                    .notes()
                    .iter()
                    .position(|note| note.id == hit.id)
                    .unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_welcome_note_seed() {
        let store = NoteStore::with_welcome_note();
        assert_eq!(store.len(), 1);
        let note = store.selected().unwrap();
        assert_eq!(note.title, "Welcome to Jotter");
        assert!(note.is_favorite);
        assert_eq!(note.tags, vec!["important"]);
        assert!(note.word_count > 0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Create,
            UpdateContent(usize, String),
            Delete(usize),
            ToggleFavorite(usize),
            AddTag(usize, String),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Create),
                (any::<usize>(), "[a-z ]{0,12}")
                    .prop_map(|(slot, text)| Op::UpdateContent(slot, text)),
                any::<usize>().prop_map(Op::Delete),
                any::<usize>().prop_map(Op::ToggleFavorite),
                (any::<usize>(), "[a-z]{0,6}").prop_map(|(slot, tag)| Op::AddTag(slot, tag)),
            ]
        }

        fn nth_id(store: &NoteStore, slot: usize) -> Option<NoteId> {
            if store.is_empty() {
                None
            } else {
                store.notes().get(slot % store.len()).map(|note| note.id)
            }
        }

        proptest! {
            #[test]
            fn ids_stay_unique_and_selection_stays_valid(
                ops in proptest::collection::vec(op_strategy(), 0..40)
            ) {
                let mut store = NoteStore::new();
                for op in ops {
                    match op {
                        Op::Create => {
                            store.create();
                        }
                        Op::UpdateContent(slot, text) => {
                            if let Some(id) = nth_id(&store, slot) {
                                store.update(id, NotePatch::content(text.clone()));
                                let note = store.get(id).unwrap();
                                prop_assert_eq!(
                                    note.word_count,
                                    crate::text::TextStats::of(&text).word_count
                                );
                                prop_assert!(note.updated_at >= note.created_at);
                            }
                        }
                        Op::Delete(slot) => {
                            if let Some(id) = nth_id(&store, slot) {
                                store.delete(id);
                            }
                        }
                        Op::ToggleFavorite(slot) => {
                            if let Some(id) = nth_id(&store, slot) {
                                store.toggle_favorite(id);
                            }
                        }
                        Op::AddTag(slot, tag) => {
                            if let Some(id) = nth_id(&store, slot) {
                                store.add_tag(id, &tag);
                            }
                        }
                    }

                    let mut ids: Vec<_> =
                        store.notes().iter().map(|note| note.id).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), store.len());

                    if let Some(selected) = store.selected_id() {
                        prop_assert!(store.get(selected).is_some());
                    } else {
                        prop_assert!(store.is_empty());
                    }
                }
            }
        }
    }
}
