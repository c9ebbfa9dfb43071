use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::model::NOTE_CARD_ROWS;
use crate::app::{Focus, Model};
use crate::store::Note;
use crate::text::format_relative;

use super::{CONTENT_LEFT_PADDING, NOTES_WIDTH_PERCENT, SIDEBAR_WIDTH_PERCENT, overlays, status};

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(SIDEBAR_WIDTH_PERCENT),
            Constraint::Percentage(NOTES_WIDTH_PERCENT),
        ])
        .split(area)
}

pub fn content_pane_width(total_width: u16, sidebar_visible: bool) -> u16 {
    let area = Rect::new(0, 0, total_width, 1);
    let pane_width = if sidebar_visible {
        split_main_columns(area)[1].width
    } else {
        total_width
    };
    pane_width.saturating_sub(CONTENT_LEFT_PADDING).max(1)
}

/// Rows consumed by the note header (title, metadata, separator).
const HEADER_ROWS: u16 = 3;

/// Lines of the note pane available to the editor buffer.
pub fn editor_visible_height(model: &Model) -> u16 {
    model.viewport.height().saturating_sub(HEADER_ROWS)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let search_visible = model.search_query.is_some();
    let toast_visible = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(search_visible) + u16::from(toast_visible);

    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_visible)),
        height: 1,
        ..area
    };
    let search_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(toast_visible) + u16::from(search_visible)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    if model.sidebar_visible {
        let chunks = split_main_columns(main_area);
        render_sidebar(model, frame, chunks[0]);
        render_note_pane(model, frame, chunks[1]);
    } else {
        render_note_pane(model, frame, main_area);
    }

    if search_visible {
        status::render_search_bar(model, frame, search_area);
    }
    if toast_visible {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    } else {
        overlays::render_overlay(model, frame, area);
    }
}

fn render_sidebar(model: &Model, frame: &mut Frame, area: Rect) {
    let notes = model.visible_notes();
    let selected = model.store.selected_id();

    let visible_cards = (area.height.saturating_sub(2) as usize) / NOTE_CARD_ROWS;
    let max_start = notes.len().saturating_sub(visible_cards);
    let start = model.list_scroll_offset.min(max_start);
    let end = (start + visible_cards).min(notes.len());

    let card_width = area.width.saturating_sub(3) as usize;
    let mut items: Vec<Line> = Vec::new();

    if notes.is_empty() {
        items.push(Line::raw(""));
        let message = if model.store.is_empty() {
            "No notes yet"
        } else {
            "No notes found"
        };
        items.push(Line::styled(
            format!(" {message}"),
            super::style::meta_style(),
        ));
    }

    for note in notes.iter().skip(start).take(end.saturating_sub(start)) {
        let is_selected = selected == Some(note.id);
        items.extend(note_card(note, is_selected, card_width));
    }

    let title = if model.filter_query().is_empty() {
        format!("Notes ({})", model.store.len())
    } else {
        format!("Notes ({}/{})", notes.len(), model.store.len())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if model.focus == Focus::List {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    frame.render_widget(Paragraph::new(items).block(block), area);
}

fn note_card(note: &Note, is_selected: bool, width: usize) -> Vec<Line<'static>> {
    let marker = if is_selected { ">" } else { " " };
    let star = if note.is_favorite { "★ " } else { "" };
    let title_style = if is_selected {
        super::style::title_style(note.color).reversed()
    } else {
        super::style::title_style(note.color)
    };

    let title = truncate_to_width(&note.title, width.saturating_sub(2 + star.len()));
    let mut lines = vec![Line::styled(format!("{marker} {star}{title}"), title_style)];

    lines.push(Line::styled(
        format!("   {}", format_relative(note.updated_at, Utc::now())),
        super::style::meta_style(),
    ));

    let preview = preview_line(&note.content, width.saturating_sub(3));
    lines.push(Line::styled(format!("   {preview}"), super::style::meta_style()));

    if note.tags.is_empty() {
        lines.push(Line::raw(""));
    } else {
        let tags = note
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::styled(
            format!("   {}", truncate_to_width(&tags, width.saturating_sub(3))),
            super::style::tag_style(note.color),
        ));
    }

    lines
}

fn preview_line(content: &str, width: usize) -> String {
    let text = crate::content::plain_text(content);
    let first = text.lines().find(|line| !line.trim().is_empty());
    first.map_or_else(
        || "No content".to_string(),
        |line| truncate_to_width(line.trim(), width),
    )
}

fn render_note_pane(model: &Model, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    if model.store.selected().is_none() {
        render_empty_state(model, frame, area);
        return;
    }

    let header_area = Rect {
        height: HEADER_ROWS.min(area.height),
        ..area
    };
    let content_area = Rect {
        y: area.y + HEADER_ROWS.min(area.height),
        height: area.height.saturating_sub(HEADER_ROWS),
        ..area
    };

    render_note_header(model, frame, header_area);

    if model.editor_mode {
        render_edit_content(model, frame, content_area);
    } else {
        render_view_content(model, frame, content_area);
    }
}

fn render_empty_state(model: &Model, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::raw(""); (area.height / 2).saturating_sub(1) as usize];
    let headline = if model.store.is_empty() {
        "No notes yet"
    } else {
        "No note selected"
    };
    lines.push(Line::styled(
        headline,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(
        "Press n to create a note",
        super::style::meta_style(),
    ));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn render_note_header(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(note) = model.store.selected() else {
        return;
    };

    let mut title_spans = vec![Span::styled(
        format!("{}{}", " ".repeat(CONTENT_LEFT_PADDING as usize), note.title),
        super::style::title_style(note.color),
    )];
    if model.title_editing {
        title_spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        title_spans.push(Span::styled("  (renaming)", super::style::meta_style()));
    }

    let mut meta = format!(
        "{}{}",
        " ".repeat(CONTENT_LEFT_PADDING as usize),
        format_relative(note.updated_at, Utc::now())
    );
    if note.is_favorite {
        meta.push_str(" · ★");
    }
    for tag in &note.tags {
        meta.push_str(&format!(" · #{tag}"));
    }

    let lines = vec![
        Line::from(title_spans),
        Line::styled(meta, super::style::meta_style()),
        Line::raw(""),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_view_content(model: &Model, frame: &mut Frame, area: Rect) {
    let visible_lines = model
        .document
        .visible_lines(model.viewport.offset(), area.height as usize);

    let query = model.filter_query();
    let mut content: Vec<Line> = Vec::new();
    for line in visible_lines {
        let base = Style::default();
        let mut styled_spans = match line.spans() {
            Some(spans) => spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        super::style::style_for_inline(base, span.style()),
                    )
                })
                .collect::<Vec<_>>(),
            None => vec![Span::styled(line.content().to_string(), base)],
        };
        if !query.is_empty() {
            styled_spans = highlight_spans(&styled_spans, query);
        }
        content.push(Line::from(styled_spans));
    }

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(CONTENT_LEFT_PADDING));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_edit_content(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(buffer) = &model.editor_buffer else {
        return;
    };

    let total_lines = buffer.line_count();
    let gutter_width = line_number_width(total_lines);

    let visible_height = area.height as usize;
    let start = model.editor_scroll_offset;
    let end = (start + visible_height).min(total_lines);
    let cursor = buffer.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buffer.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let col = cursor.col.min(line_text.len());
            let before = &line_text[..col];
            let cursor_char_len = line_text[col..].chars().next().map_or(1, char::len_utf8);
            let cursor_char = line_text.get(col..col + cursor_char_len).unwrap_or(" ");
            let after = line_text.get(col + cursor_char_len..).unwrap_or("");

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(
                cursor_char.to_string(),
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else {
        4
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            out.push('…');
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn highlight_spans(spans: &[Span<'_>], query: &str) -> Vec<Span<'static>> {
    let needle = query.trim();
    if needle.is_empty() {
        return spans
            .iter()
            .map(|s| Span::styled(s.content.to_string(), s.style))
            .collect();
    }
    let needle_lower = needle.to_ascii_lowercase();
    let mut out = Vec::new();

    for span in spans {
        let text = span.content.to_string();
        let text_lower = text.to_ascii_lowercase();
        let mut cursor = 0usize;

        while let Some(rel_idx) = text_lower[cursor..].find(&needle_lower) {
            let start = cursor + rel_idx;
            let end = start + needle_lower.len();

            if start > cursor {
                out.push(Span::styled(text[cursor..start].to_string(), span.style));
            }
            out.push(Span::styled(
                text[start..end].to_string(),
                span.style.bg(Color::Yellow).fg(Color::Black),
            ));
            cursor = end;
        }

        if cursor < text.len() {
            out.push(Span::styled(text[cursor..].to_string(), span.style));
        }
    }

    out
}
