//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! the download action, the status line, the path dialog, and toasts.

use std::time::Instant;

use super::types::{PathInputState, Status};

/// UI state for the status page
#[derive(Clone, Debug, Default)]
pub struct UiModel {
    // ============================================
    // DOWNLOAD ACTION
    // ============================================
    /// A UI-initiated download is in flight
    pub is_loading: bool,

    /// Status line under the action (None until the first download starts)
    pub status: Option<Status>,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// Install location input (Some while the dialog is open)
    pub path_input: Option<PathInputState>,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.path_input.is_some()
    }

    /// Close all modal dialogs
    pub fn close_all_modals(&mut self) {
        self.path_input = None;
    }

    /// Open the install location dialog prefilled with `initial`
    pub fn open_path_input(&mut self, initial: &str) {
        self.path_input = Some(PathInputState::new(initial));
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    /// Check if toast should be dismissed
    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    /// Dismiss toast message
    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
