//! Main application state management
//!
//! `AppState` is the countdown engine: it owns the timer state behind a
//! mutex, applies every mutation through one code path, and publishes
//! transitions over channels so the tick task and any other observers can
//! react. The expiry check runs inside the same lock as the mutation, so
//! the notification fires exactly once per expiry.

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{ExpiryNotification, TimerState};

/// Countdown engine plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// Current countdown state
    pub timer: Arc<Mutex<TimerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    pub last_expiry: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Control-transition notifications; drives tick rescheduling
    pub state_change_tx: broadcast::Sender<TimerState>,
    /// Expiry notifications for alert collaborators
    pub expiry_tx: broadcast::Sender<ExpiryNotification>,
    /// Latest-state feed, updated on every mutation including per-second ticks
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
    /// Shutdown flag consumed by the background tasks
    shutdown_tx: watch::Sender<bool>,
    _shutdown_rx: watch::Receiver<bool>,
}

impl AppState {
    /// Create a new AppState with an idle countdown
    pub fn new(port: u16, host: String) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);
        let (expiry_tx, _) = broadcast::channel(16);
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            timer: Arc::new(Mutex::new(TimerState::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            last_expiry: Arc::new(Mutex::new(None)),
            state_change_tx,
            expiry_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            shutdown_tx,
            _shutdown_rx: shutdown_rx,
        }
    }

    /// Apply a mutation to the countdown and publish the transition.
    ///
    /// After the updater runs, the expiry branch of the rescheduling
    /// contract is evaluated under the same lock: a countdown that is
    /// running with zero seconds left stops and notifies once.
    fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerState, String>
    where
        F: FnOnce(&mut TimerState),
    {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        updater(&mut *timer);

        let expired = timer.is_expired();
        if expired {
            timer.is_running = false;
            timer.is_paused = false;
        }
        let new_state = timer.clone();
        drop(timer); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        if expired {
            self.notify_expiry();
        }

        // Notify state change listeners (this reschedules the tick source)
        if let Err(e) = self.state_change_tx.send(new_state.clone()) {
            warn!("Failed to send state change notification: {}", e);
        }
        if let Err(e) = self.timer_update_tx.send(new_state.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(new_state)
    }

    /// Set the countdown duration in whole minutes.
    ///
    /// Applies unconditionally, running or not; a countdown already running
    /// keeps running against the new remaining time.
    pub fn set_duration(&self, minutes: u64) -> Result<TimerState, String> {
        info!("Setting countdown duration to {} minute(s)", minutes);
        self.update_timer("duration", |timer| {
            timer.remaining_seconds = minutes.saturating_mul(60);
        })
    }

    /// Start (or restart) the countdown.
    ///
    /// Safe to repeat while already running; the tick source is never
    /// duplicated. Starting with zero seconds left expires immediately.
    pub fn start(&self) -> Result<TimerState, String> {
        info!("Starting countdown");
        self.update_timer("start", |timer| {
            timer.is_running = true;
            timer.is_paused = false;
        })
    }

    /// Flip the paused flag. Has no effect while the countdown is not
    /// running.
    pub fn toggle_pause(&self) -> Result<TimerState, String> {
        info!("Toggling countdown pause");
        self.update_timer("pause", |timer| {
            if timer.is_running {
                timer.is_paused = !timer.is_paused;
            }
        })
    }

    /// Stop the countdown and clear the remaining time
    pub fn reset(&self) -> Result<TimerState, String> {
        info!("Resetting countdown");
        self.update_timer("reset", |timer| {
            timer.remaining_seconds = 0;
            timer.is_running = false;
            timer.is_paused = false;
        })
    }

    /// Complete one firing of the periodic tick: decrement by one second.
    ///
    /// Eligibility is re-checked under the lock, so a tick that raced with
    /// a pause or reset decrements nothing. Reaching zero stops the
    /// countdown and emits the expiry notification.
    pub fn complete_tick(&self) -> Result<TimerState, String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        if !timer.should_tick() {
            return Ok(timer.clone());
        }

        timer.remaining_seconds -= 1;

        let expired = timer.is_expired();
        if expired {
            timer.is_running = false;
            timer.is_paused = false;
        }
        let new_state = timer.clone();
        drop(timer);

        if expired {
            info!("Countdown reached zero");
            self.notify_expiry();
            if let Err(e) = self.state_change_tx.send(new_state.clone()) {
                warn!("Failed to send state change notification: {}", e);
            }
        }

        if let Err(e) = self.timer_update_tx.send(new_state.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(new_state)
    }

    fn notify_expiry(&self) {
        let notification = ExpiryNotification::now();

        if let Ok(mut last_expiry) = self.last_expiry.lock() {
            *last_expiry = Some(notification.expired_at);
        }

        if let Err(e) = self.expiry_tx.send(notification) {
            warn!("No listener received the expiry notification: {}", e);
        }
    }

    /// Get a copy of the current countdown state
    pub fn timer_snapshot(&self) -> Result<TimerState, String> {
        self.timer
            .lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Render the current remaining time as `"MM : SS"`
    pub fn formatted_time(&self) -> Result<String, String> {
        self.timer_snapshot().map(|timer| timer.formatted_time())
    }

    /// Subscribe to control transitions of the countdown
    pub fn subscribe_state_changes(&self) -> broadcast::Receiver<TimerState> {
        self.state_change_tx.subscribe()
    }

    /// Subscribe to expiry notifications
    pub fn subscribe_expiry(&self) -> broadcast::Receiver<ExpiryNotification> {
        self.expiry_tx.subscribe()
    }

    /// Subscribe to the shutdown flag
    pub fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Watch the latest countdown state, including per-second updates
    pub fn watch_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Stop the background tasks. No tick fires after the flag is observed.
    pub fn shutdown(&self) {
        info!("Shutting down countdown engine");
        if let Err(e) = self.shutdown_tx.send(true) {
            warn!("Failed to send shutdown flag: {}", e);
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Get the time of the most recent expiry, if any
    pub fn get_last_expiry(&self) -> Option<DateTime<Utc>> {
        self.last_expiry.lock().ok().and_then(|t| *t)
    }
}
