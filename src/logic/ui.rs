//! UI state transition logic
//!
//! Pure functions deciding what the status page says in each state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::types::Status;
use crate::services::bridge::DownloadResult;
use crate::EXTENSION_DIR_NAME;

/// Toast lifetime in milliseconds
pub const TOAST_DURATION_MS: u128 = 2500;

/// Check if a toast has been visible long enough to dismiss
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Label of the download action
pub fn action_label(is_loading: bool) -> &'static str {
    if is_loading {
        "Downloading..."
    } else {
        "Download Chrome Extension"
    }
}

pub fn download_started_status() -> Status {
    Status::info("Downloading extension...")
}

/// Status shown after the host answers a download request
pub fn status_from_result(result: &DownloadResult) -> Status {
    if result.success {
        Status::success("Extension downloaded successfully")
    } else if result.message.is_empty() {
        Status::error("Failed to download extension")
    } else {
        Status::error(result.message.clone())
    }
}

/// Status shown when the host refreshed the extension on its own
pub fn auto_update_status() -> Status {
    Status::success("Extension updated automatically")
}

/// The manual "load unpacked" steps for a given install path
pub fn installation_steps(path: &str) -> [String; 4] {
    [
        format!(
            "The {} extension has been downloaded to: {}",
            EXTENSION_DIR_NAME, path
        ),
        "Open Chrome and navigate to chrome://extensions".to_string(),
        "Enable \"Developer mode\" using the toggle in the top-right corner".to_string(),
        format!(
            "Click \"Load unpacked\" and select the extension folder {} from: {}",
            EXTENSION_DIR_NAME, path
        ),
    ]
}

/// What a key press asks the page to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Download,
    OpenPathInput,
    RefreshInfo,
    /// Close the install location dialog without downloading
    CancelPathInput,
    /// Download into the location typed in the dialog
    SubmitPathInput,
    /// Any other key while the dialog is open edits its text
    EditPathInput,
    Ignore,
}

/// Map a key press to a page action
///
/// The install location dialog captures every key except Ctrl+C.
pub fn key_action(key: &KeyEvent, path_input_open: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if path_input_open {
        return match key.code {
            KeyCode::Esc => KeyAction::CancelPathInput,
            KeyCode::Enter => KeyAction::SubmitPathInput,
            _ => KeyAction::EditPathInput,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('d') => KeyAction::Download,
        KeyCode::Char('p') => KeyAction::OpenPathInput,
        KeyCode::Char('r') => KeyAction::RefreshInfo,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::StatusKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn result(success: bool, message: &str) -> DownloadResult {
        DownloadResult {
            success,
            path: "/x/arx-crx".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_toast_dismissal_threshold() {
        assert!(!should_dismiss_toast(0));
        assert!(!should_dismiss_toast(TOAST_DURATION_MS - 1));
        assert!(should_dismiss_toast(TOAST_DURATION_MS));
    }

    #[test]
    fn test_action_label() {
        assert_eq!(action_label(false), "Download Chrome Extension");
        assert_eq!(action_label(true), "Downloading...");
    }

    #[test]
    fn test_status_from_success() {
        let status = status_from_result(&result(true, "anything"));
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.message, "Extension downloaded successfully");
    }

    #[test]
    fn test_status_from_failure_uses_host_message() {
        let status = status_from_result(&result(false, "Cancelled"));
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Cancelled");
    }

    #[test]
    fn test_status_from_failure_without_message() {
        let status = status_from_result(&result(false, ""));
        assert_eq!(status.message, "Failed to download extension");
    }

    #[test]
    fn test_installation_steps_mention_path() {
        let steps = installation_steps("/home/u/arx-crx");
        assert!(steps[0].ends_with("/home/u/arx-crx"));
        assert!(steps[1].contains("chrome://extensions"));
        assert!(steps[2].contains("Developer mode"));
        assert!(steps[3].contains("Load unpacked"));
    }

    #[test]
    fn test_page_keys() {
        assert_eq!(key_action(&press(KeyCode::Char('d')), false), KeyAction::Download);
        assert_eq!(key_action(&press(KeyCode::Char('p')), false), KeyAction::OpenPathInput);
        assert_eq!(key_action(&press(KeyCode::Char('r')), false), KeyAction::RefreshInfo);
        assert_eq!(key_action(&press(KeyCode::Char('q')), false), KeyAction::Quit);
        assert_eq!(key_action(&press(KeyCode::Esc), false), KeyAction::Quit);
        assert_eq!(key_action(&press(KeyCode::Char('x')), false), KeyAction::Ignore);
    }

    #[test]
    fn test_dialog_captures_page_keys() {
        // Typing a path containing 'd', 'q' or 'p' must not trigger page actions
        for c in ['d', 'q', 'p', 'r'] {
            assert_eq!(
                key_action(&press(KeyCode::Char(c)), true),
                KeyAction::EditPathInput
            );
        }
        assert_eq!(key_action(&press(KeyCode::Enter), true), KeyAction::SubmitPathInput);
        assert_eq!(key_action(&press(KeyCode::Esc), true), KeyAction::CancelPathInput);
        assert_eq!(key_action(&press(KeyCode::Backspace), true), KeyAction::EditPathInput);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        assert_eq!(key_action(&ctrl('c'), false), KeyAction::Quit);
        assert_eq!(key_action(&ctrl('c'), true), KeyAction::Quit);
        assert_eq!(key_action(&ctrl('u'), true), KeyAction::EditPathInput);
    }
}
