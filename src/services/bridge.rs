//! Host bridge
//!
//! The boundary between the status page and the host side. Two typed
//! request/response operations (`download_extension`, `get_extension_info`)
//! and one subscription (`ExtensionUpdated`). The UI loop talks to it through
//! the channel pair returned by [`spawn_bridge_service`] so it never blocks
//! on I/O.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::cancel::{self, CancelToken};
use crate::installer::ExtensionInstaller;
use crate::logic::errors::format_error_message;
use crate::logic::path::{normalize_extension_path, resolve_target_path};
use crate::settings::SettingsStore;

const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Result of a download request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResult {
    pub success: bool,
    pub path: String,
    pub message: String,
}

impl DownloadResult {
    fn failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Stored extension location and last successful download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
    pub path: String,
    pub last_updated: i64,
}

/// Notification sent after a host-initiated refresh succeeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionUpdated {
    pub path: String,
    pub timestamp: i64,
}

/// Live subscription to `ExtensionUpdated` notifications
///
/// Dropping the handle or calling [`unsubscribe`](Self::unsubscribe) ends it.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<ExtensionUpdated>,
}

impl Subscription {
    /// Wait for the next notification; `None` once the bridge is gone
    pub async fn recv(&mut self) -> Option<ExtensionUpdated> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Subscriber lagged, skipping to newest update");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking poll used by the UI loop
    pub fn try_recv(&mut self) -> Option<ExtensionUpdated> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Subscriber lagged, skipping to newest update");
                }
                Err(_) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

/// Host-side handle shared by the UI service, the startup sync and the timer
#[derive(Clone)]
pub struct HostBridge {
    installer: Arc<ExtensionInstaller>,
    default_path: PathBuf,
    updates: broadcast::Sender<ExtensionUpdated>,
}

impl HostBridge {
    /// `default_path` is used for the first download when nothing is stored
    pub fn new(installer: Arc<ExtensionInstaller>, default_path: PathBuf) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            installer,
            default_path,
            updates,
        }
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        self.installer.settings()
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn server_url(&self) -> &str {
        self.installer.client().base_url()
    }

    /// Where a download with this `save_path` would go
    pub fn resolve_target(&self, save_path: Option<&Path>) -> PathBuf {
        let stored = self.settings().extension_path();
        resolve_target_path(save_path, &stored, &self.default_path)
    }

    /// Download the extension, optionally into a new location
    ///
    /// Never fails: every failure is folded into `success: false` and a
    /// message. The cause is logged.
    pub async fn download_extension(
        &self,
        save_path: Option<PathBuf>,
        cancel: &CancelToken,
    ) -> DownloadResult {
        let target = self.resolve_target(save_path.as_deref());
        if target.as_os_str().is_empty() {
            return DownloadResult::failure("", "Failed to determine valid extension path");
        }
        let path = target.display().to_string();

        match self.installer.install_with_cancel(&target, cancel).await {
            Ok(report) => {
                tracing::info!(path = %report.path.display(), "Extension downloaded successfully");
                DownloadResult {
                    success: true,
                    path: report.path.display().to_string(),
                    message: "Extension downloaded successfully".to_string(),
                }
            }
            Err(e) if cancel::is_cancelled(&e) => {
                tracing::info!(path = %path, "Extension download cancelled");
                DownloadResult::failure(path, "Cancelled")
            }
            Err(e) => {
                tracing::error!(path = %path, error = %format!("{:#}", e), "Error downloading extension");
                DownloadResult::failure(
                    path,
                    format!("Failed to download extension: {}", format_error_message(&e)),
                )
            }
        }
    }

    pub fn get_extension_info(&self) -> ExtensionInfo {
        let settings = self.settings().get();
        ExtensionInfo {
            path: settings.extension_path,
            last_updated: settings.last_updated,
        }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.updates.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.updates.receiver_count()
    }

    /// Re-download into the stored path and notify subscribers on success
    ///
    /// Does nothing when no path is stored yet. Returns the notification that
    /// was sent, if any.
    pub async fn refresh_stored(&self, cancel: &CancelToken) -> Option<ExtensionUpdated> {
        let stored = self.settings().extension_path();
        if stored.is_empty() {
            tracing::info!("No extension path set, skipping update");
            return None;
        }

        let target = normalize_extension_path(Path::new(&stored));
        tracing::debug!(path = %target.display(), "Refreshing extension");

        match self.installer.install_with_cancel(&target, cancel).await {
            Ok(report) => {
                let event = ExtensionUpdated {
                    path: report.path.display().to_string(),
                    timestamp: report.timestamp,
                };
                self.publish(event.clone());
                tracing::info!(path = %event.path, "Extension updated successfully");
                Some(event)
            }
            Err(e) if cancel::is_cancelled(&e) => {
                tracing::debug!("Extension refresh cancelled");
                None
            }
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "Failed to update extension");
                None
            }
        }
    }

    fn publish(&self, event: ExtensionUpdated) {
        if self.updates.send(event).is_err() {
            tracing::debug!("No subscribers for extension update");
        }
    }
}

/// Requests the UI can send to the host
#[derive(Debug, Clone)]
pub enum BridgeRequest {
    /// Download into `save_path` (or the stored/default location)
    DownloadExtension {
        save_path: Option<PathBuf>,
        cancel: CancelToken,
    },

    GetExtensionInfo,
}

/// Responses delivered back to the UI loop
#[derive(Debug, Clone)]
pub enum BridgeResponse {
    Download(DownloadResult),
    ExtensionInfo(ExtensionInfo),
}

async fn execute_request(bridge: &HostBridge, request: BridgeRequest) -> BridgeResponse {
    match request {
        BridgeRequest::DownloadExtension { save_path, cancel } => {
            BridgeResponse::Download(bridge.download_extension(save_path, &cancel).await)
        }
        BridgeRequest::GetExtensionInfo => BridgeResponse::ExtensionInfo(bridge.get_extension_info()),
    }
}

/// Spawn the bridge service worker
///
/// Each request runs in its own task; responses arrive in completion order.
/// The worker exits when the request sender is dropped.
pub fn spawn_bridge_service(
    bridge: HostBridge,
) -> (
    mpsc::UnboundedSender<BridgeRequest>,
    mpsc::UnboundedReceiver<BridgeResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<BridgeRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<BridgeResponse>();

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let bridge = bridge.clone();
            let response_tx = response_tx.clone();

            tokio::spawn(async move {
                let response = execute_request(&bridge, request).await;
                let _ = response_tx.send(response);
            });
        }
        tracing::debug!("Bridge request channel closed, service stopping");
    });

    (request_tx, response_rx)
}
