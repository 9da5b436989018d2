//! State management module
//!
//! This module contains the countdown state structures and their management logic.

pub mod app_state;
pub mod expiry;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use expiry::ExpiryNotification;
pub use timer_state::TimerState;
