//! Timer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use watchdog_core::types::id::{TimerId, UserId};

use super::state::TimerState;

/// A dead-man's-switch timer owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Timer {
    /// Unique timer identifier.
    pub id: TimerId,
    /// Owning user.
    pub user_id: UserId,
    /// Human-readable name.
    pub name: String,
    /// Kick interval in seconds (always positive).
    pub interval: i64,
    /// Expiry as unix seconds. `None` until the first kick.
    pub expiry: Option<i64>,
    /// Lifecycle state.
    pub state: TimerState,
    /// When the timer was created.
    pub created_at: DateTime<Utc>,
    /// When the timer row last changed.
    pub updated_at: DateTime<Utc>,
}

impl Timer {
    /// Expiry as a timestamp, only when the state gives it meaning.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if !self.state.has_expiry() {
            return None;
        }
        self.expiry.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Whether the timer is running and past its expiry at `now` (unix seconds).
    pub fn is_overdue(&self, now: i64) -> bool {
        self.state.can_expire() && self.expiry.is_some_and(|expiry| expiry < now)
    }
}
