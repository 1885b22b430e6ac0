//! Tracing setup
//!
//! The terminal belongs to the status page while it runs, so interactive mode
//! only logs when `--debug` is given, and then to a file in the temp
//! directory. Headless mode logs to stderr.

use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to the debug log file (interactive mode with `--debug`)
    DebugFile,
    /// Write to stderr (headless mode)
    Stderr,
    /// Drop everything (interactive mode without `--debug`)
    Off,
}

impl LogTarget {
    pub fn select(debug: bool, headless: bool) -> Self {
        match (headless, debug) {
            (true, _) => LogTarget::Stderr,
            (false, true) => LogTarget::DebugFile,
            (false, false) => LogTarget::Off,
        }
    }
}

fn env_filter(debug: bool) -> Result<EnvFilter> {
    let default_directive = if debug {
        "arx_launcher=debug"
    } else {
        "arx_launcher=info"
    };

    Ok(EnvFilter::builder()
        .with_default_directive(default_directive.parse()?)
        .from_env_lossy())
}

/// Install the global tracing subscriber
pub fn init_tracing(debug: bool, headless: bool) -> Result<()> {
    match LogTarget::select(debug, headless) {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter(debug)?)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e)),
        LogTarget::DebugFile => {
            let log_path = crate::utils::get_debug_log_path();
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)?;

            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(env_filter(debug)?)
                .with_writer(Mutex::new(log_file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;

            tracing::debug!(path = %log_path.display(), "Debug logging enabled");
            Ok(())
        }
    }
}
