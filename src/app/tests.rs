use super::model::{Focus, Overlay};
use super::{Format, Message, Model, update};
use crate::store::{NoteColor, NotePatch, NoteStore};

fn create_test_model() -> Model {
    let mut store = NoteStore::new();
    let id = store.create();
    store.update(id, NotePatch::title("First"));
    store.update(id, NotePatch::content("Alpha beta. Gamma delta."));
    Model::new(store, (80, 24))
}

fn create_multi_note_model() -> Model {
    let mut store = NoteStore::new();
    for (title, content) in [
        ("Oldest", "old words"),
        ("Middle", "middle words"),
        ("Newest", "new words"),
    ] {
        let id = store.create();
        store.update(id, NotePatch::title(title));
        store.update(id, NotePatch::content(content));
    }
    Model::new(store, (80, 24))
}

#[test]
fn test_new_note_prepends_selects_and_renames() {
    let model = create_test_model();
    let model = update(model, Message::NewNote);

    assert_eq!(model.store.len(), 2);
    let selected = model.store.selected().unwrap();
    assert_eq!(selected.title, "New note");
    assert_eq!(model.store.notes()[0].id, selected.id);
    assert!(model.title_editing);
    assert_eq!(model.focus, Focus::Note);
}

#[test]
fn test_delete_note_moves_selection_to_first_remaining() {
    let model = create_multi_note_model();
    let newest = model.store.selected_id().unwrap();
    let model = update(model, Message::DeleteNote);

    assert_eq!(model.store.len(), 2);
    assert!(model.store.get(newest).is_none());
    assert_eq!(
        model.store.selected_id(),
        Some(model.store.notes()[0].id)
    );
}

#[test]
fn test_delete_last_note_clears_selection_and_focuses_list() {
    let mut model = create_test_model();
    model.focus = Focus::Note;
    let model = update(model, Message::DeleteNote);

    assert!(model.store.is_empty());
    assert_eq!(model.store.selected_id(), None);
    assert_eq!(model.focus, Focus::List);
    assert_eq!(model.document.line_count(), 0);
}

#[test]
fn test_delete_with_no_selection_is_noop() {
    let model = Model::new(NoteStore::new(), (80, 24));
    let model = update(model, Message::DeleteNote);
    assert!(model.store.is_empty());
}

#[test]
fn test_list_navigation_changes_selection_and_document() {
    let model = create_multi_note_model();
    let model = update(model, Message::ListDown);

    let selected = model.store.selected().unwrap();
    assert_eq!(selected.title, "Middle");
    assert!(model.document.source().contains("middle words"));

    let model = update(model, Message::ListUp);
    assert_eq!(model.store.selected().unwrap().title, "Newest");
}

#[test]
fn test_list_navigation_clamps_at_ends() {
    let model = create_multi_note_model();
    let model = update(model, Message::ListUp);
    assert_eq!(model.store.selected().unwrap().title, "Newest");

    let model = update(model, Message::ListDown);
    let model = update(model, Message::ListDown);
    let model = update(model, Message::ListDown);
    assert_eq!(model.store.selected().unwrap().title, "Oldest");
}

#[test]
fn test_toggle_favorite_message() {
    let model = create_test_model();
    let model = update(model, Message::ToggleFavorite);
    assert!(model.store.selected().unwrap().is_favorite);
}

#[test]
fn test_tag_input_flow() {
    let model = create_test_model();
    let model = update(model, Message::OpenTagInput);
    assert!(matches!(model.overlay, Some(Overlay::TagInput { .. })));

    let model = update(model, Message::TagInputChar('w'));
    let model = update(model, Message::TagInputChar('i'));
    let model = update(model, Message::TagInputChar('p'));
    let model = update(model, Message::TagInputSubmit);

    assert!(model.overlay.is_none());
    assert_eq!(model.store.selected().unwrap().tags, vec!["wip"]);
}

#[test]
fn test_blank_tag_is_rejected_with_warning() {
    let model = create_test_model();
    let model = update(model, Message::OpenTagInput);
    let model = update(model, Message::TagInputChar(' '));
    let model = update(model, Message::TagInputSubmit);

    assert!(model.store.selected().unwrap().tags.is_empty());
    assert!(model.active_toast().is_some());
}

#[test]
fn test_color_picker_flow() {
    let model = create_test_model();
    let model = update(model, Message::OpenColorPicker);
    assert_eq!(model.overlay, Some(Overlay::ColorPicker));

    let model = update(model, Message::PickColor(NoteColor::Orange));
    assert!(model.overlay.is_none());
    assert_eq!(model.store.selected().unwrap().color, NoteColor::Orange);
}

#[test]
fn test_summary_overlay_shows_first_two_sentences() {
    let model = create_test_model();
    let model = update(model, Message::ShowSummary);
    match &model.overlay {
        Some(Overlay::Summary { text }) => {
            assert_eq!(text, "Alpha beta. Gamma delta.");
        }
        other => panic!("expected summary overlay, got {other:?}"),
    }

    let model = update(model, Message::CloseOverlay);
    assert!(model.overlay.is_none());
}

#[test]
fn test_summary_of_empty_note_just_toasts() {
    let model = create_test_model();
    let model = update(model, Message::NewNote);
    let model = update(model, Message::ShowSummary);
    assert!(model.overlay.is_none());
    assert!(model.active_toast().is_some());
}

#[test]
fn test_search_filters_visible_notes() {
    let model = create_multi_note_model();
    let model = update(model, Message::StartSearch);
    assert!(model.search_active);

    let model = update(model, Message::SearchInput("middle".to_string()));
    let visible = model.visible_notes();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Middle");

    let model = update(model, Message::ClearSearch);
    assert_eq!(model.visible_notes().len(), 3);
    assert!(model.search_query.is_none());
}

#[test]
fn test_search_matches_tags_case_insensitively() {
    let mut model = create_multi_note_model();
    let id = model.store.notes()[2].id;
    model.store.add_tag(id, "Urgent");

    let model = update(model, Message::SearchInput("urgent".to_string()));
    let visible = model.visible_notes();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Oldest");
}

#[test]
fn test_commit_search_keeps_filter() {
    let model = create_multi_note_model();
    let model = update(model, Message::StartSearch);
    let model = update(model, Message::SearchInput("words".to_string()));
    let model = update(model, Message::CommitSearch);

    assert!(!model.search_active);
    assert_eq!(model.filter_query(), "words");
    assert_eq!(model.focus, Focus::List);
}

#[test]
fn test_commit_of_empty_search_clears_it() {
    let model = create_multi_note_model();
    let model = update(model, Message::StartSearch);
    let model = update(model, Message::CommitSearch);
    assert!(model.search_query.is_none());
}

#[test]
fn test_list_navigation_follows_filtered_order() {
    let model = create_multi_note_model();
    let model = update(model, Message::SearchInput("o".to_string()));
    // "Newest" has no 'o' in title or content? "new words" does. All match "o"
    // via "words"/"old". Narrow the filter to hit exactly two notes.
    let model = update(model, Message::SearchInput("old".to_string()));
    let visible: Vec<_> = model.visible_notes().iter().map(|n| n.title.clone()).collect();
    assert_eq!(visible, vec!["Oldest"]);

    let model = update(model, Message::ListDown);
    assert_eq!(model.store.selected().unwrap().title, "Oldest");
}

#[test]
fn test_title_editing_flow() {
    let model = create_test_model();
    let model = update(model, Message::StartTitleEdit);
    assert!(model.title_editing);

    let model = update(model, Message::TitleBackspace);
    let model = update(model, Message::TitleChar('!'));
    assert_eq!(model.store.selected().unwrap().title, "Firs!");

    let model = update(model, Message::EndTitleEdit);
    assert!(!model.title_editing);
}

#[test]
fn test_enter_edit_mode_loads_buffer() {
    let model = create_test_model();
    let model = update(model, Message::EnterEditMode);
    assert!(model.editor_mode);
    assert_eq!(model.focus, Focus::Note);
    assert_eq!(
        model.editor_buffer.as_ref().unwrap().text(),
        "Alpha beta. Gamma delta."
    );
}

#[test]
fn test_editor_keystrokes_update_store_stats() {
    let model = create_test_model();
    let model = update(model, Message::EnterEditMode);
    let before = model.store.selected().unwrap().word_count;

    let model = update(model, Message::EditorInsertChar(' '));
    let model = update(model, Message::EditorInsertChar('x'));

    let note = model.store.selected().unwrap();
    assert_eq!(note.word_count, before + 1);
    assert!(note.content.ends_with(" x"));
}

#[test]
fn test_exit_edit_mode_refreshes_document() {
    let model = create_test_model();
    let model = update(model, Message::EnterEditMode);
    let model = update(model, Message::EditorSplitLine);
    let model = update(model, Message::EditorInsertChar('Z'));
    let model = update(model, Message::ExitEditMode);

    assert!(!model.editor_mode);
    assert!(model.editor_buffer.is_none());
    assert!(model.document.source().ends_with("Z"));
}

#[test]
fn test_apply_bold_format_wraps_word() {
    let model = create_test_model();
    let model = update(model, Message::EnterEditMode);
    // Cursor starts at the end of the buffer, on "delta".
    let model = update(model, Message::EditorMoveCursor(crate::editor::Direction::Left));
    let model = update(model, Message::ApplyFormat(Format::Bold));

    let content = &model.store.selected().unwrap().content;
    assert!(content.contains("**delta**"), "got: {content}");
}

#[test]
fn test_apply_list_format_prefixes_line() {
    let model = create_test_model();
    let model = update(model, Message::EnterEditMode);
    let model = update(model, Message::ApplyFormat(Format::BulletList));
    let content = &model.store.selected().unwrap().content;
    assert!(content.starts_with("- "), "got: {content}");
}

#[test]
fn test_switch_focus_toggles_panes() {
    let model = create_test_model();
    assert_eq!(model.focus, Focus::List);
    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.focus, Focus::Note);
    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.focus, Focus::List);
}

#[test]
fn test_toggle_sidebar_reflows_document() {
    let model = create_test_model();
    let width_before = model.layout_width();
    let model = update(model, Message::ToggleSidebar);
    assert!(!model.sidebar_visible);
    assert!(model.layout_width() > width_before);
}

#[test]
fn test_resize_reflows_and_clamps() {
    let model = create_test_model();
    let model = update(model, Message::Resize(40, 12));
    assert_eq!(model.viewport.width(), 40);
    assert_eq!(model.viewport.height(), 11);
}

#[test]
fn test_toggle_help() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_asks_once_when_notes_exist() {
    let model = create_test_model();
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert!(model.active_toast().is_some());

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_confirmation_resets_on_other_action() {
    let model = create_test_model();
    let model = update(model, Message::Quit);
    let model = update(model, Message::ListDown);
    assert!(!model.quit_confirmed);
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
}

#[test]
fn test_quit_immediately_when_empty() {
    let model = Model::new(NoteStore::new(), (80, 24));
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_new_note_while_editing_leaves_edit_mode() {
    let model = create_test_model();
    let model = update(model, Message::EnterEditMode);
    let model = update(model, Message::NewNote);
    assert!(!model.editor_mode);
    assert!(model.title_editing);
    assert_eq!(model.store.len(), 2);
}

#[test]
fn test_list_click_selects_visible_index() {
    let model = create_multi_note_model();
    let model = update(model, Message::ListClick(2));
    assert_eq!(model.store.selected().unwrap().title, "Oldest");
    assert_eq!(model.focus, Focus::List);
}
