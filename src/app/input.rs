use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::model::{Focus, Overlay};
use crate::app::{App, Message, Model};
use crate::app::update::Format;
use crate::store::NoteColor;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(overlay) = &model.overlay {
            return Self::handle_overlay_key(key, overlay);
        }

        if model.search_active {
            return Self::handle_search_key(key, model);
        }

        if model.title_editing {
            return Self::handle_title_key(key);
        }

        if model.editor_mode {
            return Self::handle_editor_key(key);
        }

        match model.focus {
            Focus::List => Self::handle_list_key(key, model),
            Focus::Note => Self::handle_view_key(key, model),
        }
    }

    fn handle_overlay_key(key: KeyEvent, overlay: &Overlay) -> Option<Message> {
        match overlay {
            Overlay::TagInput { .. } => match key.code {
                KeyCode::Esc => Some(Message::CloseOverlay),
                KeyCode::Enter => Some(Message::TagInputSubmit),
                KeyCode::Backspace => Some(Message::TagInputBackspace),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::TagInputChar(c))
                }
                _ => None,
            },
            Overlay::ColorPicker => match key.code {
                KeyCode::Char(c) if ('1'..='7').contains(&c) => {
                    let index = (c as u8 - b'1') as usize;
                    NoteColor::ALL.get(index).copied().map(Message::PickColor)
                }
                _ => Some(Message::CloseOverlay),
            },
            // Any key dismisses the summary.
            Overlay::Summary { .. } => Some(Message::CloseOverlay),
        }
    }

    fn handle_search_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let query = model.filter_query();
        match key.code {
            KeyCode::Esc => Some(Message::ClearSearch),
            KeyCode::Enter => Some(Message::CommitSearch),
            KeyCode::Backspace => {
                let mut next = query.to_string();
                next.pop();
                Some(Message::SearchInput(next))
            }
            KeyCode::Down => Some(Message::ListDown),
            KeyCode::Up => Some(Message::ListUp),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut next = query.to_string();
                next.push(c);
                Some(Message::SearchInput(next))
            }
            _ => None,
        }
    }

    fn handle_title_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => Some(Message::EndTitleEdit),
            KeyCode::Backspace => Some(Message::TitleBackspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::TitleChar(c))
            }
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Message::ExitEditMode),

            // Formatting
            KeyCode::Char('b') if ctrl => Some(Message::ApplyFormat(Format::Bold)),
            KeyCode::Char('i') if ctrl => Some(Message::ApplyFormat(Format::Italic)),
            KeyCode::Char('u') if ctrl => Some(Message::ApplyFormat(Format::Underline)),
            KeyCode::Char('l') if ctrl => Some(Message::ApplyFormat(Format::BulletList)),
            KeyCode::Char('o') if ctrl => Some(Message::ApplyFormat(Format::NumberedList)),

            // Cursor movement
            KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight),
            KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
            KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
            KeyCode::Left => Some(Message::EditorMoveCursor(crate::editor::Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(crate::editor::Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(crate::editor::Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(crate::editor::Direction::Down)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorScrollUp(10)),
            KeyCode::PageDown => Some(Message::EditorScrollDown(10)),

            // Editing
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Tab => Some(Message::EditorInsertChar('\t')),
            KeyCode::Char(c) if !ctrl => Some(Message::EditorInsertChar(c)),

            _ => None,
        }
    }

    fn handle_list_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            // Quit
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ListDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ListUp),
            KeyCode::Enter | KeyCode::Tab => {
                if model.store.selected_id().is_some() {
                    Some(Message::SwitchFocus)
                } else {
                    None
                }
            }

            // Note operations
            KeyCode::Char('n') => Some(Message::NewNote),
            KeyCode::Char('d') => Some(Message::DeleteNote),
            KeyCode::Char('f') => Some(Message::ToggleFavorite),
            KeyCode::Char('c') => Some(Message::OpenColorPicker),
            KeyCode::Char('t') | KeyCode::Char('#') => Some(Message::OpenTagInput),
            KeyCode::Char('s') => Some(Message::ShowSummary),
            KeyCode::Char('r') => Some(Message::StartTitleEdit),

            // Search
            KeyCode::Char('/') => Some(Message::StartSearch),
            KeyCode::Esc if model.search_query.is_some() => Some(Message::ClearSearch),

            // Layout
            KeyCode::Char('B') => Some(Message::ToggleSidebar),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            _ => None,
        }
    }

    fn handle_view_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Esc | KeyCode::Tab => Some(Message::SwitchFocus),

            // Scrolling
            KeyCode::Char('j') | KeyCode::Down => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Editing
            KeyCode::Char('e') | KeyCode::Char('i') | KeyCode::Enter => {
                Some(Message::EnterEditMode)
            }
            KeyCode::Char('r') => Some(Message::StartTitleEdit),

            // Note operations
            KeyCode::Char('n') => Some(Message::NewNote),
            KeyCode::Char('d') => Some(Message::DeleteNote),
            KeyCode::Char('f') => Some(Message::ToggleFavorite),
            KeyCode::Char('c') => Some(Message::OpenColorPicker),
            KeyCode::Char('t') | KeyCode::Char('#') => Some(Message::OpenTagInput),
            KeyCode::Char('s') => Some(Message::ShowSummary),

            // Search
            KeyCode::Char('/') => Some(Message::StartSearch),

            KeyCode::Char('B') => Some(Message::ToggleSidebar),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.overlay.is_some() {
            return None;
        }

        let total_area = Rect::new(
            0,
            0,
            model.viewport.width(),
            model.viewport.height().saturating_add(1),
        );

        if model.sidebar_visible {
            let chunks = crate::ui::split_main_columns(total_area);
            let sidebar = chunks[0];
            let in_sidebar = mouse.column >= sidebar.x
                && mouse.column < sidebar.x + sidebar.width
                && mouse.row >= sidebar.y
                && mouse.row < sidebar.y + sidebar.height;

            if in_sidebar {
                return match mouse.kind {
                    MouseEventKind::Up(MouseButton::Left) => {
                        // Inside the border, cards are fixed-height rows.
                        if mouse.row <= sidebar.y
                            || mouse.row >= sidebar.y + sidebar.height.saturating_sub(1)
                        {
                            return None;
                        }
                        let rel_row = (mouse.row - sidebar.y - 1) as usize;
                        let index =
                            model.list_scroll_offset + rel_row / crate::app::model::NOTE_CARD_ROWS;
                        if index < model.visible_notes().len() {
                            Some(Message::ListClick(index))
                        } else {
                            None
                        }
                    }
                    MouseEventKind::ScrollDown => Some(Message::ListScrollDown),
                    MouseEventKind::ScrollUp => Some(Message::ListScrollUp),
                    _ => None,
                };
            }
        }

        match mouse.kind {
            MouseEventKind::ScrollDown if model.editor_mode => Some(Message::EditorScrollDown(3)),
            MouseEventKind::ScrollUp if model.editor_mode => Some(Message::EditorScrollUp(3)),
            MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
