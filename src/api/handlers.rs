//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

use crate::state::AppState;

use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

/// Handle POST /duration - Set the countdown duration in whole minutes
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_duration(request.minutes) {
        Ok(timer) => {
            info!(
                "Duration endpoint called - countdown set to {} minute(s)",
                request.minutes
            );
            Ok(Json(ApiResponse::for_timer(
                format!("Countdown set to {} minute(s)", request.minutes),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to set countdown duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(timer) => {
            info!("Start endpoint called - countdown phase is {}", timer.phase());
            let message = if timer.is_running {
                "Countdown started".to_string()
            } else {
                // Starting with nothing on the clock expires immediately
                "Countdown expired".to_string()
            };
            Ok(Json(ApiResponse::for_timer(message, timer)))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause or resume the countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_pause() {
        Ok(timer) => {
            info!("Pause endpoint called - countdown phase is {}", timer.phase());
            let message = if !timer.is_running {
                "Pause has no effect while idle".to_string()
            } else if timer.is_paused {
                "Countdown paused".to_string()
            } else {
                "Countdown resumed".to_string()
            };
            Ok(Json(ApiResponse::for_timer(message, timer)))
        }
        Err(e) => {
            error!("Failed to toggle countdown pause: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Reset the countdown
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(timer) => {
            info!("Reset endpoint called - countdown cleared");
            Ok(Json(ApiResponse::for_timer(
                "Countdown reset".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to reset countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current countdown status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer_snapshot() {
        Ok(timer) => timer,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        phase: timer.phase().to_string(),
        display: timer.formatted_time(),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        last_expiry: state.get_last_expiry(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
