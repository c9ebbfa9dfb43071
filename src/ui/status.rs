use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let query = model.filter_query();
    let matched = model.visible_notes().len();
    let match_info = if query.is_empty() {
        String::new()
    } else {
        format!("  [{matched} match{}]", if matched == 1 { "" } else { "es" })
    };
    let hint = if model.search_active {
        "  Enter: keep filter  Esc: clear"
    } else {
        "  Esc: clear"
    };
    let text = format!("/{query}{match_info}{hint}");
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if model.editor_mode {
        render_editor_status_bar(model, frame, area);
        return;
    }

    let total = model.store.len();
    let status = model.store.selected().map_or_else(
        || format!(" {total} notes  n:new  ?:help"),
        |note| {
            let favorite = if note.is_favorite { " ★" } else { "" };
            let position = model
                .selected_visible_index()
                .map_or_else(String::new, |idx| {
                    format!("  {}/{}", idx + 1, model.visible_notes().len())
                });
            format!(
                " {}{favorite}{position}  {} words  {} min read  ?:help",
                note.title, note.word_count, note.read_time
            )
        },
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

fn render_editor_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let title = model
        .store
        .selected()
        .map_or_else(|| "untitled".to_string(), |note| note.title.clone());

    let cursor_info = model
        .editor_buffer
        .as_ref()
        .map_or_else(String::new, |buffer| {
            let cursor = buffer.cursor();
            format!("  Ln {}, Col {}", cursor.line + 1, cursor.col + 1)
        });

    let words = model
        .store
        .selected()
        .map_or_else(String::new, |note| format!("  {} words", note.word_count));

    let status = format!(" EDIT  {title}{cursor_info}{words}  Esc:view  Ctrl+B/I/U:format");

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
