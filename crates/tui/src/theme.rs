//! Colors and styles shared by every view.
//!
//! One fixed dark palette with a warm accent; there is no theme switching.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Accent for focus, keys in hint lines and the selected row.
pub const ACCENT: Color = Color::Rgb(230, 150, 60);

pub const FG: Color = Color::Rgb(226, 224, 218);

/// Secondary text: hints, labels, empty states.
pub const FG_MUTED: Color = Color::Rgb(160, 156, 148);

pub const BORDER: Color = Color::Rgb(80, 76, 70);
pub const BORDER_FOCUS: Color = ACCENT;

pub const BG_PANEL: Color = Color::Rgb(22, 20, 18);
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 36, 28);

/// Validation messages and error notices.
pub const WARN: Color = Color::Rgb(220, 96, 110);

pub const OK: Color = Color::Rgb(120, 190, 120);

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn title_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(FG)
}

pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

pub fn key_style() -> Style {
    title_style().fg(ACCENT)
}

pub fn error_style() -> Style {
    Style::default().fg(WARN)
}

pub fn success_style() -> Style {
    Style::default().fg(OK)
}

/// Focused input rows get a subtle background.
pub fn highlight_style() -> Style {
    Style::default().fg(FG).bg(BG_HIGHLIGHT)
}

/// List and table selection: accent and bold, no fill.
pub fn list_highlight_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Rounded, titled panel whose border follows focus.
pub fn block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .title(title)
        .title_style(title_style())
        .style(Style::default().bg(BG_PANEL))
}
