//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Request body for setting the countdown duration.
///
/// `minutes` deserializes as an unsigned integer, so negative, fractional,
/// and non-numeric input is rejected before it reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub minutes: u64,
}

/// API response structure for countdown control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response whose status reflects the countdown phase
    pub fn for_timer(message: String, timer: TimerState) -> Self {
        Self::new(timer.phase().to_string(), message, timer)
    }
}

/// Status response with countdown and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub phase: String,
    pub display: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub last_expiry: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "0.1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_request_rejects_fractional_minutes() {
        assert!(serde_json::from_str::<DurationRequest>(r#"{"minutes":1.5}"#).is_err());
        assert!(serde_json::from_str::<DurationRequest>(r#"{"minutes":-1}"#).is_err());
        assert!(serde_json::from_str::<DurationRequest>(r#"{"minutes":"two"}"#).is_err());

        let request: DurationRequest = serde_json::from_str(r#"{"minutes":2}"#).unwrap();
        assert_eq!(request.minutes, 2);
    }

    #[test]
    fn test_api_response_status_follows_phase() {
        let mut timer = TimerState::new();
        timer.remaining_seconds = 60;
        timer.is_running = true;

        let response = ApiResponse::for_timer("Countdown started".to_string(), timer);
        assert_eq!(response.status, "running");
    }
}
