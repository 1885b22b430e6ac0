//! Host Services
//!
//! This module contains the host-side background services:
//! - bridge: UI-facing request/response operations and update subscription
//! - updater: Startup sync and periodic refresh timer

pub mod bridge;
pub mod updater;

// Re-export commonly used types for convenience
pub use bridge::{
    BridgeRequest, BridgeResponse, DownloadResult, ExtensionInfo, ExtensionUpdated, HostBridge,
    Subscription,
};
