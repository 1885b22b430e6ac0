//! Bridge Response Handler
//!
//! Applies host answers and notifications to the model.

use crate::services::bridge::{BridgeResponse, ExtensionUpdated};
use crate::App;

/// Handle a response from the bridge service
///
/// A successful download is followed by a fresh info request so the page
/// shows the stored path and timestamp.
pub fn handle_bridge_response(app: &mut App, response: BridgeResponse) {
    match response {
        BridgeResponse::Download(result) => {
            app.active_download = None;
            app.model.apply_download_result(&result);

            if result.success {
                tracing::debug!(path = %result.path, "Download finished, refreshing info");
                app.request_extension_info();
            } else {
                tracing::debug!(message = %result.message, "Download failed");
            }
        }
        BridgeResponse::ExtensionInfo(info) => {
            app.model.apply_extension_info(&info);
        }
    }
}

/// Handle a host-initiated refresh notification
pub fn handle_extension_updated(app: &mut App, event: ExtensionUpdated) {
    tracing::debug!(path = %event.path, "Extension updated notification");
    app.model.apply_extension_updated(&event);
}
