//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - bridge: Responses and update notifications from the host side
//! - keyboard: User keyboard input
//!
//! Handlers take &mut App, update the model, and send follow-up requests.

pub mod bridge;
pub mod keyboard;

// Re-export for convenience
pub use bridge::{handle_bridge_response, handle_extension_updated};
pub use keyboard::handle_key;
