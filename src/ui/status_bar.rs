use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::logic::formatting::format_duration_compact;

/// Text of the bottom status bar
pub fn build_status_line(server_url: &str, interval_secs: u64, secs_until_refresh: u64) -> String {
    format!(
        "Server: {} │ Refresh every {} │ Next refresh in {}",
        server_url,
        format_duration_compact(interval_secs),
        format_duration_compact(secs_until_refresh)
    )
}

/// Render the bottom status bar
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    server_url: &str,
    interval_secs: u64,
    secs_until_refresh: u64,
) {
    let line = Line::from(Span::styled(
        build_status_line(server_url, interval_secs, secs_until_refresh),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_contents() {
        let line = build_status_line("https://arxena.com", 600, 65);
        assert_eq!(
            line,
            "Server: https://arxena.com │ Refresh every 10m 0s │ Next refresh in 1m 5s"
        );
    }
}
