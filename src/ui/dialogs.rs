use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme;
use crate::model::PathInputState;

/// Render the install location dialog
///
/// The text cursor is placed on the input line. Long values scroll so the
/// cursor stays visible.
pub fn render_path_input(f: &mut Frame, state: &PathInputState) {
    let area = f.area();
    let prompt_width = area.width.min(70);
    let prompt_height = 7;
    let prompt_area = Rect {
        x: (area.width.saturating_sub(prompt_width)) / 2,
        y: (area.height.saturating_sub(prompt_height)) / 2,
        width: prompt_width,
        height: prompt_height.min(area.height),
    };

    // Inner width minus borders
    let inner_width = prompt_width.saturating_sub(2) as usize;
    let cursor_offset = state.cursor_display_offset();
    let scroll = cursor_offset.saturating_sub(inner_width.saturating_sub(1));

    let lines = vec![
        Line::raw("Folder to install the extension into"),
        Line::styled(
            format!("(an {} folder is created inside)", crate::EXTENSION_DIR_NAME),
            Style::default().fg(Color::Gray),
        ),
        Line::raw(""),
        Line::styled(state.value.clone(), Style::default().fg(Color::White)),
    ];

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Install Location")
                .border_style(Style::default().fg(theme::PRIMARY)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .scroll((0, scroll as u16));

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);

    // Input is the 4th line inside the block
    let cursor_x = prompt_area.x + 1 + (cursor_offset - scroll) as u16;
    let cursor_y = prompt_area.y + 4;
    if cursor_y < prompt_area.y + prompt_area.height.saturating_sub(1) {
        f.set_cursor_position((cursor_x, cursor_y));
    }
}
