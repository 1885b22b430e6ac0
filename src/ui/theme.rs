//! Static palette and spacing for the status page.

use ratatui::style::{Color, Modifier, Style};

use crate::model::StatusKind;

pub const PRIMARY: Color = Color::Rgb(0x42, 0x85, 0xF4);
pub const SECONDARY: Color = Color::Rgb(0x34, 0xA8, 0x53);
pub const SUCCESS: Color = Color::Rgb(0x34, 0xA8, 0x53);
pub const ERROR: Color = Color::Rgb(0xEA, 0x43, 0x35);
pub const LIGHT_GRAY: Color = Color::Rgb(0xE8, 0xEA, 0xED);
/// Hotkey highlight, same as the rest of the legend family
pub const HOTKEY: Color = Color::Yellow;

/// Horizontal padding inside the content column
pub const SPACING_MD: u16 = 2;
/// Widest the content column gets on large terminals
pub const MAX_CONTENT_WIDTH: u16 = 90;

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(LIGHT_GRAY)
}

pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Foreground for a status message of the given kind
pub fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Info => PRIMARY,
        StatusKind::Success => SUCCESS,
        StatusKind::Error => ERROR,
    }
}

/// Style of the download action; dimmed while a download runs
pub fn action_style(is_loading: bool) -> Style {
    if is_loading {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(Color::White)
            .bg(PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}
