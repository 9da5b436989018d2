//! Expiry alert background task

use std::sync::Arc;

use notify_rust::Notification;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::AppState;

/// Background task that surfaces expiry notifications to the user.
///
/// The engine only emits the notification; this task presents it, as a log
/// line and a best-effort desktop alert. Headless embedders can skip this
/// task and subscribe to the expiry channel directly.
pub async fn expiry_alert_task(state: Arc<AppState>) {
    info!("Starting expiry alert task");

    let mut expiry_rx = state.subscribe_expiry();
    let mut shutdown_rx = state.subscribe_shutdown();

    loop {
        tokio::select! {
            received = expiry_rx.recv() => match received {
                Ok(notification) => {
                    info!("Countdown expired at {}", notification.expired_at);
                    if let Err(e) = send_desktop_alert() {
                        warn!("Failed to send desktop alert: {}", e);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Expiry alert task lagged behind {} notification(s)", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = shutdown_rx.changed() => break,
        }
    }

    info!("Expiry alert task stopped");
}

fn send_desktop_alert() -> Result<(), Box<dyn std::error::Error>> {
    Notification::new()
        .summary("Egg Timer")
        .body("Time is up!")
        .timeout(0) // No auto-dismiss
        .show()?;
    Ok(())
}
