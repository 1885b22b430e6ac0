//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the status page.
//! The Model is organized into focused sub-models:
//!
//! - **ExtensionModel**: Installed extension info and refresh schedule
//! - **UiModel**: Download action, status line, dialogs, toasts
//!
//! No services live here; handlers feed bridge responses in and the
//! renderer reads state out.

pub mod extension;
pub mod types;
pub mod ui;

use std::time::Duration;

pub use extension::ExtensionModel;
pub use types::*;
pub use ui::UiModel;

use crate::logic;
use crate::services::bridge::{DownloadResult, ExtensionInfo, ExtensionUpdated};

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    /// Host-side data (extension info, server, refresh schedule)
    pub extension: ExtensionModel,

    /// UI state and popups
    pub ui: UiModel,
}

impl Model {
    pub fn new(server_url: impl Into<String>, refresh_interval: Duration) -> Self {
        Self {
            extension: ExtensionModel::new(server_url, refresh_interval),
            ui: UiModel::new(),
        }
    }

    /// Enter the loading state for a UI-initiated download
    ///
    /// Returns false if a download is already in flight, in which case
    /// nothing changes.
    pub fn begin_download(&mut self) -> bool {
        if self.ui.is_loading {
            return false;
        }
        self.ui.is_loading = true;
        self.ui.status = Some(logic::ui::download_started_status());
        true
    }

    /// Apply the host's answer to a download request
    ///
    /// On success the caller should re-request extension info.
    pub fn apply_download_result(&mut self, result: &DownloadResult) {
        self.ui.is_loading = false;
        self.ui.status = Some(logic::ui::status_from_result(result));
    }

    pub fn apply_extension_info(&mut self, info: &ExtensionInfo) {
        self.extension.info = Some(ExtensionInfoView {
            path: info.path.clone(),
            last_updated: info.last_updated,
        });
    }

    /// Apply a host-initiated refresh notification
    pub fn apply_extension_updated(&mut self, event: &ExtensionUpdated) {
        self.extension.info = Some(ExtensionInfoView {
            path: event.path.clone(),
            last_updated: event.timestamp,
        });
        self.ui.status = Some(logic::ui::auto_update_status());
        self.extension.roll_refresh_schedule();
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }

    /// Check if toast should be dismissed
    pub fn should_dismiss_toast(&self) -> bool {
        self.ui.should_dismiss_toast()
    }

    /// Dismiss toast message
    pub fn dismiss_toast(&mut self) {
        self.ui.dismiss_toast();
    }
}
