// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - theme: Palette, spacing and shared styles
// - layout: Calculates screen layout (header, action, instructions, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - header: Renders the title and subtitle
// - status_box: Renders the download action and status message
// - instructions: Renders the manual installation steps
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar (server, refresh schedule)
// - dialogs: Renders the install location input
// - toast: Renders toast notifications (brief pop-up messages)

pub mod dialogs;
pub mod header;
pub mod instructions;
pub mod layout;
pub mod legend;
pub mod render;
pub mod status_bar;
pub mod status_box;
pub mod theme;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
