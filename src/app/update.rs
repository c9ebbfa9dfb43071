use crate::app::Model;
use crate::app::model::{Focus, Overlay, ToastLevel};
use crate::editor::Direction;
use crate::store::NoteColor;
use crate::text::summarize;

/// A formatting command applied to the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    BulletList,
    NumberedList,
}

/// All possible events and actions in the application.
///
/// These represent user input and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Note list
    /// Move list selection up
    ListUp,
    /// Move list selection down
    ListDown,
    /// Select the note at an index in the filtered list (mouse)
    ListClick(usize),
    /// Scroll the sidebar without changing selection
    ListScrollUp,
    /// Scroll the sidebar without changing selection
    ListScrollDown,

    // Note operations
    /// Create a new note and start editing its title
    NewNote,
    /// Delete the selected note
    DeleteNote,
    /// Flip the favorite flag of the selected note
    ToggleFavorite,

    // Overlays
    /// Open the tag-entry overlay
    OpenTagInput,
    /// Append a character to the tag input
    TagInputChar(char),
    /// Remove the last character of the tag input
    TagInputBackspace,
    /// Commit the tag input
    TagInputSubmit,
    /// Open the color picker overlay
    OpenColorPicker,
    /// Apply a palette color to the selected note
    PickColor(NoteColor),
    /// Generate and show the summary overlay
    ShowSummary,
    /// Close whatever overlay is open
    CloseOverlay,

    // Search
    /// Start search input mode
    StartSearch,
    /// Replace the search query
    SearchInput(String),
    /// Leave search input mode, keeping the filter
    CommitSearch,
    /// Clear the search filter entirely
    ClearSearch,

    // Focus & layout
    /// Switch focus between list and note pane
    SwitchFocus,
    /// Toggle sidebar visibility
    ToggleSidebar,

    // Content view scrolling
    /// Scroll the content view up by n lines
    ScrollUp(usize),
    /// Scroll the content view down by n lines
    ScrollDown(usize),
    /// Scroll the content view up one page
    PageUp,
    /// Scroll the content view down one page
    PageDown,
    /// Go to the top of the content view
    GoToTop,
    /// Go to the bottom of the content view
    GoToBottom,

    // Title editing
    /// Begin editing the selected note's title
    StartTitleEdit,
    /// Append a character to the title
    TitleChar(char),
    /// Remove the last character of the title
    TitleBackspace,
    /// Stop editing the title
    EndTitleEdit,

    // Editor
    /// Enter edit mode (load content into the editor buffer)
    EnterEditMode,
    /// Exit edit mode (return to view mode)
    ExitEditMode,
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),
    /// Apply a formatting command at the cursor
    ApplyFormat(Format),

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Quitting discards every note; the confirmation only survives
    // back-to-back quit presses.
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }

    match msg {
        // Note list
        Message::ListUp => {
            model.move_selection(-1);
        }
        Message::ListDown => {
            model.move_selection(1);
        }
        Message::ListClick(index) => {
            model.select_visible_index(index);
            model.focus = Focus::List;
        }
        Message::ListScrollUp => {
            model.list_scroll_offset = model.list_scroll_offset.saturating_sub(1);
        }
        Message::ListScrollDown => {
            model.list_scroll_offset =
                (model.list_scroll_offset + 1).min(model.max_list_scroll_offset());
        }

        // Note operations
        Message::NewNote => {
            model.exit_edit_mode();
            model.store.create();
            model.refresh_document();
            model.ensure_selected_visible();
            // A fresh note wants a title first.
            model.focus = Focus::Note;
            model.title_editing = true;
        }
        Message::DeleteNote => {
            let Some(id) = model.store.selected_id() else {
                return model;
            };
            model.exit_edit_mode();
            model.title_editing = false;
            model.store.delete(id);
            model.refresh_document();
            model.ensure_selected_visible();
            if model.store.is_empty() {
                model.focus = Focus::List;
            }
            model.show_toast(ToastLevel::Info, "Note deleted");
        }
        Message::ToggleFavorite => {
            if let Some(id) = model.store.selected_id() {
                model.store.toggle_favorite(id);
            }
        }

        // Overlays
        Message::OpenTagInput => {
            if model.store.selected_id().is_some() {
                model.overlay = Some(Overlay::TagInput {
                    input: String::new(),
                });
            }
        }
        Message::TagInputChar(ch) => {
            if let Some(Overlay::TagInput { input }) = &mut model.overlay {
                input.push(ch);
            }
        }
        Message::TagInputBackspace => {
            if let Some(Overlay::TagInput { input }) = &mut model.overlay {
                input.pop();
            }
        }
        Message::TagInputSubmit => {
            if let Some(Overlay::TagInput { input }) = model.overlay.take() {
                if let Some(id) = model.store.selected_id() {
                    if model.store.add_tag(id, &input) {
                        model.show_toast(ToastLevel::Info, format!("Tagged #{}", input.trim()));
                    } else if !input.is_empty() {
                        model.show_toast(ToastLevel::Warning, "Tags cannot be blank");
                    }
                }
            }
        }
        Message::OpenColorPicker => {
            if model.store.selected_id().is_some() {
                model.overlay = Some(Overlay::ColorPicker);
            }
        }
        Message::PickColor(color) => {
            if let Some(id) = model.store.selected_id() {
                model.store.set_color(id, color);
            }
            model.overlay = None;
        }
        Message::ShowSummary => {
            if let Some(note) = model.store.selected() {
                if note.content.is_empty() {
                    model.show_toast(ToastLevel::Info, "Nothing to summarize");
                } else {
                    model.overlay = Some(Overlay::Summary {
                        text: summarize(&note.content),
                    });
                }
            }
        }
        Message::CloseOverlay => {
            model.overlay = None;
        }

        // Search
        Message::StartSearch => {
            model.search_query = Some(String::new());
            model.search_active = true;
        }
        Message::SearchInput(query) => {
            model.search_query = Some(query);
            model.list_scroll_offset = 0;
            model.ensure_selected_visible();
        }
        Message::CommitSearch => {
            model.search_active = false;
            if model.filter_query().is_empty() {
                model.search_query = None;
            }
            model.focus = Focus::List;
        }
        Message::ClearSearch => {
            model.search_query = None;
            model.search_active = false;
            model.list_scroll_offset = 0;
            model.ensure_selected_visible();
        }

        // Focus & layout
        Message::SwitchFocus => {
            model.title_editing = false;
            model.focus = match model.focus {
                Focus::List => Focus::Note,
                Focus::Note => Focus::List,
            };
        }
        Message::ToggleSidebar => {
            model.sidebar_visible = !model.sidebar_visible;
            model.refresh_document();
        }

        // Content view scrolling
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        // Title editing
        Message::StartTitleEdit => {
            if model.store.selected_id().is_some() {
                model.title_editing = true;
                model.focus = Focus::Note;
            }
        }
        Message::TitleChar(ch) => {
            if model.title_editing
                && let Some(note) = model.store.selected()
            {
                let id = note.id;
                let mut title = note.title.clone();
                title.push(ch);
                model
                    .store
                    .update(id, crate::store::NotePatch::title(title));
            }
        }
        Message::TitleBackspace => {
            if model.title_editing
                && let Some(note) = model.store.selected()
            {
                let id = note.id;
                let mut title = note.title.clone();
                title.pop();
                model
                    .store
                    .update(id, crate::store::NotePatch::title(title));
            }
        }
        Message::EndTitleEdit => {
            model.title_editing = false;
        }

        // Editor
        Message::EnterEditMode => {
            model.title_editing = false;
            model.enter_edit_mode();
        }
        Message::ExitEditMode => {
            model.exit_edit_mode();
        }
        Message::EditorInsertChar(ch) => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.insert_char(ch);
                sync_editor_content(&mut model);
                editor_ensure_cursor_visible(&mut model);
            }
        }
        Message::EditorDeleteBack => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.delete_back();
                sync_editor_content(&mut model);
                editor_ensure_cursor_visible(&mut model);
            }
        }
        Message::EditorDeleteForward => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.delete_forward();
                sync_editor_content(&mut model);
            }
        }
        Message::EditorSplitLine => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.split_line();
                sync_editor_content(&mut model);
                editor_ensure_cursor_visible(&mut model);
            }
        }
        Message::EditorMoveCursor(direction) => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_cursor(direction);
                editor_ensure_cursor_visible(&mut model);
            }
        }
        Message::EditorMoveHome => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_home();
            }
        }
        Message::EditorMoveEnd => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_end();
            }
        }
        Message::EditorMoveWordLeft => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_word_left();
            }
        }
        Message::EditorMoveWordRight => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_word_right();
            }
        }
        Message::EditorMoveToStart => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_to_start();
                editor_ensure_cursor_visible(&mut model);
            }
        }
        Message::EditorMoveToEnd => {
            if let Some(buffer) = &mut model.editor_buffer {
                buffer.move_to_end();
                editor_ensure_cursor_visible(&mut model);
            }
        }
        Message::EditorScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max = model
                .editor_buffer
                .as_ref()
                .map_or(0, |buffer| buffer.line_count().saturating_sub(1));
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max);
        }
        Message::ApplyFormat(format) => {
            if let Some(buffer) = &mut model.editor_buffer {
                match format {
                    Format::Bold => buffer.toggle_inline_marker("**"),
                    Format::Italic => buffer.toggle_inline_marker("*"),
                    Format::Underline => buffer.toggle_inline_marker("__"),
                    Format::BulletList => buffer.toggle_line_prefix("- "),
                    Format::NumberedList => buffer.toggle_line_prefix("1. "),
                }
                sync_editor_content(&mut model);
            }
        }

        // Help
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.refresh_document();
            model.ensure_selected_visible();
        }
        Message::Redraw => {}

        // Application
        Message::Quit => {
            if model.store.is_empty() || model.quit_confirmed {
                model.should_quit = true;
            } else {
                model.show_toast(
                    ToastLevel::Warning,
                    "Notes are not saved anywhere! Press again to quit",
                );
                model.quit_confirmed = true;
            }
        }
    }
    model
}

/// Mirror the editor buffer into the store so stats and `updated_at`
/// track every keystroke.
fn sync_editor_content(model: &mut Model) {
    let Some(id) = model.store.selected_id() else {
        return;
    };
    if let Some(buffer) = &model.editor_buffer {
        model
            .store
            .update(id, crate::store::NotePatch::content(buffer.text()));
    }
}

/// Ensure the editor cursor line is visible in the note pane.
fn editor_ensure_cursor_visible(model: &mut Model) {
    let Some(buffer) = &model.editor_buffer else {
        return;
    };
    let cursor_line = buffer.cursor().line;
    let visible_height = crate::ui::editor_visible_height(model) as usize;
    if visible_height == 0 {
        model.editor_scroll_offset = cursor_line;
        return;
    }

    if cursor_line < model.editor_scroll_offset {
        model.editor_scroll_offset = cursor_line;
    } else if cursor_line >= model.editor_scroll_offset + visible_height {
        model.editor_scroll_offset = cursor_line + 1 - visible_height;
    }
}
