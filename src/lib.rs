//! Egg Timer - a state-managed HTTP server for countdown timer control
//!
//! The library half exposes the countdown engine (state plus background
//! tick task) so it can be embedded and driven headless; the binary wires
//! it to an HTTP control surface and a desktop expiry alert.

pub mod api;
pub mod config;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
