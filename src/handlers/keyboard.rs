//! Keyboard Input Handler
//!
//! The install location dialog, when open, receives every key. Otherwise
//! keys map to page actions.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use crate::logic::ui::{key_action, KeyAction};
use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key_action(&key, app.model.ui.has_modal()) {
        KeyAction::Quit => {
            app.model.ui.should_quit = true;
        }
        KeyAction::Download => {
            if !app.start_download(None) {
                app.model.show_toast("Download already in progress".to_string());
            }
        }
        KeyAction::OpenPathInput => {
            let initial = app
                .model
                .extension
                .known_path()
                .map(|path| path.to_string())
                .unwrap_or_else(|| app.default_path.display().to_string());
            app.model.ui.open_path_input(&initial);
        }
        KeyAction::RefreshInfo => {
            app.request_extension_info();
            app.model.show_toast("Extension info refreshed".to_string());
        }
        KeyAction::CancelPathInput => {
            app.model.ui.close_all_modals();
        }
        KeyAction::SubmitPathInput => submit_path_input(app),
        KeyAction::EditPathInput => edit_path_input(app, key),
        KeyAction::Ignore => {}
    }

    Ok(())
}

fn submit_path_input(app: &mut App) {
    let Some(value) = app
        .model
        .ui
        .path_input
        .as_ref()
        .and_then(|input| input.submitted_value())
        .map(PathBuf::from)
    else {
        app.model.show_toast("Error: Enter a folder path".to_string());
        return;
    };

    app.model.ui.close_all_modals();
    if !app.start_download(Some(value)) {
        app.model.show_toast("Download already in progress".to_string());
    }
}

fn edit_path_input(app: &mut App, key: KeyEvent) {
    let Some(input) = app.model.ui.path_input.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) => input.insert_char(c),
        _ => {}
    }
}
