use std::time::{Duration, Instant};

use crate::content::Document;
use crate::editor::EditorBuffer;
use crate::store::{Note, NoteId, NoteStore};
use crate::ui::viewport::Viewport;

/// Rows a note card occupies in the sidebar: title, date, preview, tags.
pub const NOTE_CARD_ROWS: usize = 4;

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The sidebar note list
    List,
    /// The note pane (view or edit)
    Note,
}

/// Modal overlay state.
///
/// Overlays replace the original app's blocking prompt/alert calls: they
/// capture input while open and resolve through ordinary messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Single-line tag entry
    TagInput { input: String },
    /// Palette swatches selected with keys 1-7
    ColorPicker,
    /// Generated note summary, dismissed by any key
    Summary { text: String },
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The note collection and selection
    pub store: NoteStore,
    /// Rendered content of the selected note (view mode)
    pub document: Document,
    /// Viewport managing content-pane scroll position
    pub viewport: Viewport,
    /// Whether the sidebar note list is visible
    pub sidebar_visible: bool,
    /// Scroll offset of the sidebar, in cards
    pub list_scroll_offset: usize,
    /// Which pane has keyboard focus
    pub focus: Focus,
    /// Current search filter (None = no filter)
    pub search_query: Option<String>,
    /// Whether keystrokes currently feed the search bar
    pub search_active: bool,
    /// Active modal overlay, if any
    pub overlay: Option<Overlay>,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether the note pane is in edit mode
    pub editor_mode: bool,
    /// The editor text buffer (populated in edit mode)
    pub editor_buffer: Option<EditorBuffer>,
    /// Scroll offset for the editor viewport (first visible line)
    pub editor_scroll_offset: usize,
    /// Whether keystrokes currently edit the note title
    pub title_editing: bool,
    toast: Option<Toast>,
    /// Set after the first quit press; notes are transient, so quitting
    /// discards everything and asks once
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("notes", &self.store.len())
            .field("selected", &self.store.selected_id())
            .field("focus", &self.focus)
            .field("editor_mode", &self.editor_mode)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model with default settings.
    pub fn new(store: NoteStore, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            store,
            document: Document::empty(),
            viewport: Viewport::new(terminal_size.0, terminal_size.1.saturating_sub(1), 0),
            sidebar_visible: true,
            list_scroll_offset: 0,
            focus: Focus::List,
            search_query: None,
            search_active: false,
            overlay: None,
            help_visible: false,
            editor_mode: false,
            editor_buffer: None,
            editor_scroll_offset: 0,
            title_editing: false,
            toast: None,
            quit_confirmed: false,
            should_quit: false,
        };
        model.refresh_document();
        model
    }

    /// The active filter string (empty when no search).
    pub fn filter_query(&self) -> &str {
        self.search_query.as_deref().unwrap_or("")
    }

    /// Notes matching the active filter, in collection order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.store.filter(self.filter_query())
    }

    /// Position of the selected note within the filtered list.
    pub fn selected_visible_index(&self) -> Option<usize> {
        let selected = self.store.selected_id()?;
        self.visible_notes()
            .iter()
            .position(|note| note.id == selected)
    }

    /// Width available to rendered note content.
    pub fn layout_width(&self) -> u16 {
        crate::ui::content_pane_width(self.viewport.width(), self.sidebar_visible)
    }

    /// Number of note cards that fit in the sidebar.
    pub fn list_visible_cards(&self) -> usize {
        // Sidebar frame has a 1-cell border at top and bottom.
        (self.viewport.height().saturating_sub(2) as usize) / NOTE_CARD_ROWS
    }

    pub fn max_list_scroll_offset(&self) -> usize {
        self.visible_notes()
            .len()
            .saturating_sub(self.list_visible_cards())
    }

    /// Re-render the selected note's content into the view document.
    ///
    /// Called on selection change, edit-mode exit, sidebar toggle and
    /// resize. Stats never go through here - the store keeps those
    /// current on every content update.
    pub fn refresh_document(&mut self) {
        self.document = self
            .store
            .selected()
            .map_or_else(Document::empty, |note| {
                Document::parse_with_layout(&note.content, self.layout_width())
            });
        self.viewport.set_total_lines(self.document.line_count());
    }

    /// Move the selection by `delta` within the filtered list.
    pub(super) fn move_selection(&mut self, delta: isize) {
        let ids: Vec<NoteId> = self.visible_notes().iter().map(|note| note.id).collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .selected_visible_index()
            .map_or(0, |idx| idx.saturating_add_signed(delta).min(ids.len() - 1));
        self.store.select(ids[current]);
        self.viewport.go_to_top();
        self.refresh_document();
        self.ensure_selected_visible();
    }

    /// Select the note at `index` in the filtered list (mouse click).
    pub(super) fn select_visible_index(&mut self, index: usize) {
        let ids: Vec<NoteId> = self.visible_notes().iter().map(|note| note.id).collect();
        if let Some(id) = ids.get(index).copied() {
            self.store.select(id);
            self.viewport.go_to_top();
            self.refresh_document();
            self.ensure_selected_visible();
        }
    }

    /// Keep the selected card inside the sidebar viewport.
    pub(super) fn ensure_selected_visible(&mut self) {
        let Some(index) = self.selected_visible_index() else {
            return;
        };
        let visible = self.list_visible_cards();
        if visible == 0 {
            self.list_scroll_offset = index;
            return;
        }
        if index < self.list_scroll_offset {
            self.list_scroll_offset = index;
        } else if index >= self.list_scroll_offset + visible {
            self.list_scroll_offset = index + 1 - visible;
        }
        self.list_scroll_offset = self.list_scroll_offset.min(self.max_list_scroll_offset());
    }

    /// Load the selected note into the editor buffer and enter edit mode.
    pub(super) fn enter_edit_mode(&mut self) {
        let Some(note) = self.store.selected() else {
            return;
        };
        if self.editor_mode {
            return;
        }
        let mut buffer = EditorBuffer::from_text(&note.content);
        buffer.move_to_end();
        self.editor_buffer = Some(buffer);
        self.editor_mode = true;
        self.editor_scroll_offset = 0;
        self.focus = Focus::Note;
    }

    /// Drop the editor buffer and re-render the view document.
    ///
    /// Content is already in the store - every buffer edit is mirrored
    /// there immediately - so exiting never loses anything.
    pub(super) fn exit_edit_mode(&mut self) {
        if !self.editor_mode {
            return;
        }
        self.editor_mode = false;
        self.editor_buffer = None;
        self.editor_scroll_offset = 0;
        self.refresh_document();
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(NoteStore::new(), (80, 24))
    }
}
