//! Countdown tick background task

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that owns the single periodic tick source.
///
/// The task re-derives "should a tick be active" from a fresh state
/// snapshot on every control transition. The previous interval is dropped
/// before a new one is created, so two concurrent tick sources cannot
/// exist. While eligible, the interval fires once per second and each
/// firing decrements the countdown by one.
pub async fn countdown_tick_task(state: Arc<AppState>) {
    info!("Starting countdown tick task");

    let mut state_rx = state.subscribe_state_changes();
    let mut shutdown_rx = state.subscribe_shutdown();

    let mut current = match state.timer_snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to read initial timer state: {}", e);
            return;
        }
    };

    'run: loop {
        if *shutdown_rx.borrow() {
            break 'run;
        }

        if current.should_tick() {
            debug!(
                "Tick source active with {} second(s) remaining",
                current.remaining_seconds
            );
            let mut ticker = interval_at(
                Instant::now() + Duration::from_secs(1),
                Duration::from_secs(1),
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            current = loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match state.complete_tick() {
                            Ok(after) => {
                                debug!("Tick completed: {} second(s) remaining", after.remaining_seconds);
                                if !after.should_tick() {
                                    break after;
                                }
                            }
                            Err(e) => {
                                error!("Failed to complete tick: {}", e);
                                break 'run;
                            }
                        }
                    }
                    changed = state_rx.recv() => match changed {
                        // Control transition: drop this interval and
                        // re-evaluate against the new snapshot
                        Ok(snapshot) => break snapshot,
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("Tick task lagged behind {} state change(s), resyncing", skipped);
                            match state.timer_snapshot() {
                                Ok(snapshot) => break snapshot,
                                Err(e) => {
                                    error!("Failed to resync timer state: {}", e);
                                    break 'run;
                                }
                            }
                        }
                        Err(RecvError::Closed) => break 'run,
                    },
                    _ = shutdown_rx.changed() => break 'run,
                }
            };
        } else {
            tokio::select! {
                changed = state_rx.recv() => match changed {
                    Ok(snapshot) => current = snapshot,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Tick task lagged behind {} state change(s), resyncing", skipped);
                        match state.timer_snapshot() {
                            Ok(snapshot) => current = snapshot,
                            Err(e) => {
                                error!("Failed to resync timer state: {}", e);
                                break 'run;
                            }
                        }
                    }
                    Err(RecvError::Closed) => break 'run,
                },
                _ = shutdown_rx.changed() => break 'run,
            }
        }
    }

    info!("Countdown tick task stopped");
}
