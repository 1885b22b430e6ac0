//! Business Logic
//!
//! This module contains pure functions that can be unit tested:
//! - errors: Error chain to status-line message
//! - formatting: Timestamps and durations for display
//! - path: Extension path resolution and normalization
//! - ui: Status messages and instruction text per UI state

pub mod errors;
pub mod formatting;
pub mod path;
pub mod ui;
