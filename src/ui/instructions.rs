use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::theme;
use crate::logic;

/// Render the numbered "load unpacked" steps for `path`
pub fn render_instructions(f: &mut Frame, area: Rect, path: &str) {
    let lines: Vec<Line> = logic::ui::installation_steps(path)
        .into_iter()
        .enumerate()
        .map(|(idx, step)| {
            Line::from(vec![
                Span::styled(
                    format!("{}. ", idx + 1),
                    Style::default()
                        .fg(theme::SECONDARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(step),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Installation Instructions ")
        .title_style(theme::title_style())
        .border_style(Style::default().fg(theme::LIGHT_GRAY))
        .padding(Padding::horizontal(theme::SPACING_MD));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
