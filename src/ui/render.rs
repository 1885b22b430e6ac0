use crate::App;
use ratatui::Frame;

use super::{dialogs, header, instructions, layout, legend, status_bar, status_box, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;
    let info = model.extension.info.as_ref();
    let status = model.ui.status.as_ref();
    let path_input_open = model.ui.path_input.is_some();

    let legend_height =
        legend::calculate_legend_height(size.width, model.ui.is_loading, path_input_open);
    let known_path = model.extension.known_path();
    let layout_info = layout::calculate_layout(
        size,
        status_box::action_area_height(status, info),
        known_path.is_some(),
        legend_height,
    );

    header::render_header(f, layout_info.header_area);

    status_box::render_action_area(
        f,
        layout_info.action_area,
        model.ui.is_loading,
        status,
        info,
    );

    if let Some(path) = known_path {
        instructions::render_instructions(f, layout_info.instructions_area, path);
    }

    legend::render_legend(
        f,
        layout_info.legend_area,
        model.ui.is_loading,
        path_input_open,
    );

    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        &model.extension.server_url,
        model.extension.refresh_interval.as_secs(),
        model.extension.secs_until_refresh(),
    );

    if let Some(state) = &model.ui.path_input {
        dialogs::render_path_input(f, state);
    }

    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
