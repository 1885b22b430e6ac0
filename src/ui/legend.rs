use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme;

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(is_loading: bool, path_input_open: bool) -> Vec<Span<'static>> {
    let key = |label: &'static str| Span::styled(label, Style::default().fg(theme::HOTKEY));

    // The path dialog captures every key, so only its own bindings apply
    if path_input_open {
        return vec![
            key("Enter"),
            Span::raw(":Download here  "),
            key("Esc"),
            Span::raw(":Cancel  "),
            key("←/→"),
            Span::raw(":Move"),
        ];
    }

    let mut hotkey_spans = vec![];

    // Download - hidden while one is already running
    if !is_loading {
        hotkey_spans.extend(vec![key("d"), Span::raw(":Download  ")]);
    }

    hotkey_spans.extend(vec![
        key("p"),
        Span::raw(":Install location  "),
        key("r"),
        Span::raw(":Refresh info  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(is_loading: bool, path_input_open: bool) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(is_loading, path_input_open));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend
pub fn render_legend(f: &mut Frame, area: Rect, is_loading: bool, path_input_open: bool) {
    f.render_widget(build_legend_paragraph(is_loading, path_input_open), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, is_loading: bool, path_input_open: bool) -> u16 {
    // Count lines without the block; line_count() does not subtract borders
    let hotkey_line = Line::from(build_hotkey_spans(is_loading, path_input_open));
    let paragraph_for_counting =
        Paragraph::new(vec![hotkey_line]).wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}
