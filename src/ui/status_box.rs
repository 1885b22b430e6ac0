//! Download action and status box
//!
//! The action line always shows; the status box under it only once a status
//! exists.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme;
use crate::logic;
use crate::model::{ExtensionInfoView, Status};

/// Lines of the status box body, without borders
fn build_status_lines(status: &Status, info: Option<&ExtensionInfoView>) -> Vec<Line<'static>> {
    let color = theme::status_color(status.kind);
    let mut lines = vec![Line::from(Span::styled(
        status.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];

    if let Some(info) = info {
        lines.push(Line::from(Span::styled(
            format!(
                "Last updated: {}",
                logic::formatting::format_timestamp(info.last_updated)
            ),
            theme::muted_style(),
        )));
    }

    lines
}

/// Rows needed by [`render_action_area`]
pub fn action_area_height(status: Option<&Status>, info: Option<&ExtensionInfoView>) -> u16 {
    // Action line plus a blank separator
    let action = 2;
    match status {
        Some(status) => action + build_status_lines(status, info).len() as u16 + 2,
        None => action,
    }
}

pub fn render_action_area(
    f: &mut Frame,
    area: Rect,
    is_loading: bool,
    status: Option<&Status>,
    info: Option<&ExtensionInfoView>,
) {
    let label = format!("  {}  ", logic::ui::action_label(is_loading));
    let action_line = Line::from(vec![
        Span::styled("[d] ", Style::default().fg(theme::HOTKEY)),
        Span::styled(label, theme::action_style(is_loading)),
    ]);

    let action_area = Rect { height: area.height.min(1), ..area };
    f.render_widget(
        Paragraph::new(action_line).alignment(Alignment::Center),
        action_area,
    );

    let Some(status) = status else {
        return;
    };

    let box_area = Rect {
        y: area.y + 2,
        height: area.height.saturating_sub(2),
        ..area
    };
    let color = theme::status_color(status.kind);
    let paragraph = Paragraph::new(build_status_lines(status, info))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, box_area);
}
