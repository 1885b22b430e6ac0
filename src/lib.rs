//! Arxena Extension Launcher Library
//!
//! Exposes the host-side modules (settings, installer, bridge, updater) to the
//! binary and to the integration tests.

pub mod api;
pub mod cancel;
pub mod config;
pub mod installer;
pub mod logging;
pub mod logic;
pub mod model;
pub mod services;
pub mod settings;
pub mod utils;

/// Name of the directory the unpacked extension lives in
pub const EXTENSION_DIR_NAME: &str = "arx-crx";

/// Origin serving the packaged extension
pub const DEFAULT_SERVER_URL: &str = "https://arxena.com";
