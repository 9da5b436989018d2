//! Expiry notification payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification emitted exactly once each time the countdown reaches zero.
///
/// The engine only emits this; presenting it to the user is a subscriber's
/// job (see the expiry alert task).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryNotification {
    pub expired_at: DateTime<Utc>,
}

impl ExpiryNotification {
    /// Create a notification stamped with the current time
    pub fn now() -> Self {
        Self {
            expired_at: Utc::now(),
        }
    }
}
