use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Title and subtitle
    pub header_area: Rect,
    /// Download action plus status box
    pub action_area: Rect,
    /// Installation steps (zero height when no path is known)
    pub instructions_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Center a column of at most `max_width` inside `area`
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(
    terminal_size: Rect,
    action_height: u16,
    show_instructions: bool,
    legend_height: u16,
) -> LayoutInfo {
    let instructions_height = if show_instructions { 8 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                   // Header (title, subtitle, padding)
            Constraint::Length(action_height),       // Action + status box
            Constraint::Length(instructions_height), // Instructions card
            Constraint::Min(0),                      // Spacer
            Constraint::Length(legend_height),       // Legend (exact fit for wrapped content)
            Constraint::Length(1),                   // Status bar
        ])
        .split(terminal_size);

    let column = |rect: Rect| centered_column(rect, theme::MAX_CONTENT_WIDTH);

    LayoutInfo {
        header_area: column(main_chunks[0]),
        action_area: column(main_chunks[1]),
        instructions_area: column(main_chunks[2]),
        legend_area: main_chunks[4],
        status_area: main_chunks[5],
    }
}
