//! Startup sync and periodic refresh
//!
//! On launch the host either performs the first download into the default
//! location or re-downloads into the stored one. After that a timer repeats
//! the refresh until shutdown.

use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::cancel::CancelToken;
use crate::logic::path::normalize_extension_path;
use crate::services::bridge::{DownloadResult, ExtensionUpdated, HostBridge};

/// What the startup sync did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupSync {
    /// Nothing was stored, so the extension was fetched into the default path
    FirstInstall(DownloadResult),
    /// The stored path was refreshed; `None` if the refresh failed
    Refreshed(Option<ExtensionUpdated>),
}

/// Run the launch-time download
pub async fn startup_sync(bridge: &HostBridge, cancel: &CancelToken) -> StartupSync {
    let settings = bridge.settings();
    let stored = settings.extension_path();

    if stored.is_empty() {
        tracing::info!(
            path = %bridge.default_path().display(),
            "No stored extension path, performing first download"
        );
        return StartupSync::FirstInstall(bridge.download_extension(None, cancel).await);
    }

    let normalized = normalize_extension_path(Path::new(&stored));
    let normalized = normalized.to_string_lossy();
    if normalized != stored {
        tracing::info!(from = %stored, to = %normalized, "Normalizing stored extension path");
        if let Err(e) = settings.set_extension_path(&normalized) {
            tracing::warn!(error = %e, "Failed to save normalized extension path");
        }
    }

    StartupSync::Refreshed(bridge.refresh_stored(cancel).await)
}

/// Spawn the refresh timer
///
/// The first tick is skipped because the startup sync already ran. The task
/// exits when `shutdown` is cancelled; an in-flight refresh is cancelled
/// with it.
pub fn spawn_periodic_updater(
    bridge: HostBridge,
    period: Duration,
    shutdown: CancelToken,
) -> JoinHandle<()> {
    let period = period.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        tracing::info!(period_secs = period.as_secs(), "Periodic extension refresh armed");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    tracing::debug!("Periodic extension refresh");
                    bridge.refresh_stored(&shutdown).await;
                }
            }
        }

        tracing::info!("Periodic extension refresh stopped");
    })
}
