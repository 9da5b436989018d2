//! Countdown timer state structure and projections

use serde::{Deserialize, Serialize};

/// Countdown state: seconds left to zero plus the running/paused flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub is_paused: bool,
}

impl TimerState {
    /// Create a fresh idle countdown
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            is_running: false,
            is_paused: false,
        }
    }

    /// Check whether a periodic tick should be active for this state
    pub fn should_tick(&self) -> bool {
        self.is_running && !self.is_paused && self.remaining_seconds > 0
    }

    /// Check whether the countdown has run out while still marked running
    pub fn is_expired(&self) -> bool {
        self.is_running && self.remaining_seconds == 0
    }

    /// Whole minutes left on the display
    pub fn display_minutes(&self) -> u64 {
        self.remaining_seconds / 60
    }

    /// Seconds column of the display
    pub fn display_seconds(&self) -> u64 {
        self.remaining_seconds % 60
    }

    /// Render the remaining time as zero-padded `"MM : SS"`
    pub fn formatted_time(&self) -> String {
        format!("{:02} : {:02}", self.display_minutes(), self.display_seconds())
    }

    /// Informal phase label for status reporting
    pub fn phase(&self) -> &'static str {
        if !self.is_running {
            "idle"
        } else if self.is_paused {
            "paused"
        } else {
            "running"
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_remaining(remaining_seconds: u64) -> TimerState {
        TimerState {
            remaining_seconds,
            is_running: false,
            is_paused: false,
        }
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = TimerState::new();
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.is_running);
        assert!(!state.is_paused);
        assert_eq!(state.phase(), "idle");
    }

    #[test]
    fn test_formatted_time_is_zero_padded() {
        assert_eq!(with_remaining(0).formatted_time(), "00 : 00");
        assert_eq!(with_remaining(9).formatted_time(), "00 : 09");
        assert_eq!(with_remaining(60).formatted_time(), "01 : 00");
        assert_eq!(with_remaining(61).formatted_time(), "01 : 01");
        assert_eq!(with_remaining(600).formatted_time(), "10 : 00");
        assert_eq!(with_remaining(5999).formatted_time(), "99 : 59");
    }

    #[test]
    fn test_display_columns_decode_back_to_seconds() {
        for remaining in [0, 1, 59, 60, 61, 599, 3600, 5999] {
            let state = with_remaining(remaining);
            assert_eq!(
                state.display_minutes() * 60 + state.display_seconds(),
                remaining
            );
        }
    }

    #[test]
    fn test_phase_labels() {
        let mut state = with_remaining(30);
        assert_eq!(state.phase(), "idle");
        state.is_running = true;
        assert_eq!(state.phase(), "running");
        state.is_paused = true;
        assert_eq!(state.phase(), "paused");
    }

    #[test]
    fn test_should_tick_requires_running_unpaused_and_time_left() {
        let mut state = with_remaining(10);
        assert!(!state.should_tick());
        state.is_running = true;
        assert!(state.should_tick());
        state.is_paused = true;
        assert!(!state.should_tick());
        state.is_paused = false;
        state.remaining_seconds = 0;
        assert!(!state.should_tick());
    }
}
