//! Theming and color definitions.
//!
//! Maps the fixed note palette and the inline style allow-list onto ANSI
//! colors that respect the terminal's theme.

use ratatui::style::{Color, Modifier, Style};

use crate::content::InlineStyle;
use crate::store::NoteColor;

/// Accent color for a palette entry.
///
/// Indexed colors fill the gaps the base ANSI set doesn't cover (pink,
/// orange) so the palette stays distinct on 256-color terminals.
pub const fn accent(color: NoteColor) -> Color {
    match color {
        NoteColor::Blue => Color::Blue,
        NoteColor::Purple => Color::Magenta,
        NoteColor::Pink => Color::Indexed(211),
        NoteColor::Green => Color::Green,
        NoteColor::Yellow => Color::Yellow,
        NoteColor::Orange => Color::Indexed(208),
        NoteColor::Gray => Color::DarkGray,
    }
}

/// Style for a tag chip on a note of the given color.
pub const fn tag_style(color: NoteColor) -> Style {
    Style::new().fg(accent(color))
}

/// Style for a note title line.
pub const fn title_style(color: NoteColor) -> Style {
    Style::new().fg(accent(color)).add_modifier(Modifier::BOLD)
}

/// Dim style for metadata rows (dates, previews).
pub const fn meta_style() -> Style {
    Style::new().fg(Color::Indexed(245))
}

/// Get the style for an inline span, merged with a base style.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}
