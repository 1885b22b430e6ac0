use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme;

pub const TITLE: &str = "Arxena Extension Manager";
pub const SUBTITLE: &str = "Download and manage your Arxena extension";

/// Render the page title and subtitle
pub fn render_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(TITLE, theme::title_style())),
        Line::from(Span::styled(SUBTITLE, theme::subtitle_style())),
    ];

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
