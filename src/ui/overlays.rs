use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::{Model, Overlay};
use crate::store::NoteColor;

pub fn render_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    match &model.overlay {
        Some(Overlay::TagInput { input }) => render_tag_input_overlay(input, frame, area),
        Some(Overlay::ColorPicker) => render_color_picker_overlay(model, frame, area),
        Some(Overlay::Summary { text }) => render_summary_overlay(text, frame, area),
        None => {}
    }
}

fn render_tag_input_overlay(input: &str, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(44, 5, area);

    let lines = vec![
        Line::from(vec![
            Span::raw("#"),
            Span::styled(input.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        Line::styled(
            "Enter adds the tag · Esc cancels",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];

    let block = Block::default()
        .title("Add tag")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_color_picker_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let current = model.store.selected().map(|note| note.color);
    #[allow(clippy::cast_possible_truncation)]
    let popup_height = NoteColor::ALL.len() as u16 + 4;
    let popup = centered_popup_rect(30, popup_height, area);

    let mut lines: Vec<Line> = Vec::new();
    for (index, color) in NoteColor::ALL.iter().enumerate() {
        let marker = if current == Some(*color) { "●" } else { "○" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", index + 1),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{marker} {}", color.name()),
                super::style::tag_style(*color),
            ),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "1-7 picks · any other key cancels",
        Style::default().fg(Color::Indexed(245)),
    ));

    let block = Block::default()
        .title("Note color")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_summary_overlay(text: &str, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(16).clamp(30, 70);
    let popup = centered_popup_rect(popup_width, 8, area);

    let mut lines = vec![Line::raw(text.to_string()), Line::raw("")];
    lines.push(Line::styled(
        "any key closes",
        Style::default().fg(Color::Indexed(245)),
    ));

    let block = Block::default()
        .title("Summary")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        popup,
    );
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Notes", section_style));
    all_lines.push(Line::raw("  n                   New note"));
    all_lines.push(Line::raw("  d                   Delete note"));
    all_lines.push(Line::raw("  f                   Toggle favorite"));
    all_lines.push(Line::raw("  c                   Pick color"));
    all_lines.push(Line::raw("  t / #               Add tag"));
    all_lines.push(Line::raw("  s                   Summarize note"));
    all_lines.push(Line::raw("  r                   Rename note"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Navigation", section_style));
    all_lines.push(Line::raw("  j/k or Up/Down      Move through list / scroll"));
    all_lines.push(Line::raw("  Enter / Tab         Switch between list and note"));
    all_lines.push(Line::raw("  g / G               Top / bottom of note"));
    all_lines.push(Line::raw("  B                   Toggle sidebar"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  e / i / Enter       Edit note content"));
    all_lines.push(Line::raw("  Esc                 Back to view mode"));
    all_lines.push(Line::raw("  Ctrl+B / I / U      Bold / italic / underline"));
    all_lines.push(Line::raw("  Ctrl+L / Ctrl+O     Bullet / numbered list"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Search", section_style));
    all_lines.push(Line::raw("  /                   Filter notes"));
    all_lines.push(Line::raw("  Enter               Keep filter, back to list"));
    all_lines.push(Line::raw("  Esc                 Clear filter"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  q / Ctrl-c          Quit (notes are not saved)"));
    all_lines.push(Line::raw("  ? / F1              Toggle help"));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
