//! Timer engine: create, inspect, kick, and delete timers.
//!
//! Every operation is scoped by `(timer id, user id)`. A timer that belongs
//! to another user yields the same `NotFound` as one that does not exist.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};
use validator::Validate;

use watchdog_core::error::AppError;
use watchdog_core::traits::Notifier;
use watchdog_core::types::id::{TimerId, UserId};
use watchdog_database::repositories::TimerRepository;
use watchdog_entity::timer::{Timer, TimerEvent};

/// Longest accepted kick interval: ten years.
pub const MAX_INTERVAL_SECONDS: i64 = 315_360_000;

/// Reads a kick may retry before giving up on a timer that keeps changing.
const KICK_ATTEMPTS: usize = 5;

/// Input for creating a timer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTimer {
    /// Timer name.
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,
    /// Kick interval in seconds.
    #[validate(range(min = 1, max = 315_360_000, message = "Interval must be a positive number of seconds"))]
    pub interval: i64,
}

/// Manages the timer lifecycle.
#[derive(Debug, Clone)]
pub struct TimerService {
    /// Timer repository.
    timer_repo: Arc<TimerRepository>,
    /// Notification capability.
    notifier: Arc<dyn Notifier>,
}

impl TimerService {
    /// Creates a new timer service.
    pub fn new(timer_repo: Arc<TimerRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            timer_repo,
            notifier,
        }
    }

    /// Create a timer in state `new` and tell the owner about it.
    pub async fn create(&self, user_id: UserId, input: NewTimer) -> Result<Timer, AppError> {
        let input = NewTimer {
            name: input.name.trim().to_string(),
            interval: input.interval,
        };
        input
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid timer: {e}")))?;

        let timer = self
            .timer_repo
            .create(user_id, &input.name, input.interval)
            .await?;

        info!(
            timer_id = %timer.id,
            user_id = %user_id,
            interval = timer.interval,
            "Timer created"
        );

        self.notify(&timer, TimerEvent::Created).await;
        Ok(timer)
    }

    /// Get a timer owned by `user_id`.
    pub async fn get(&self, user_id: UserId, timer_id: TimerId) -> Result<Timer, AppError> {
        self.timer_repo
            .find_by_id_and_owner(timer_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Timer not found"))
    }

    /// List all timers owned by `user_id`, ordered by id.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Timer>, AppError> {
        self.timer_repo.find_by_owner(user_id).await
    }

    /// Kick a timer: `expiry = now + interval`, state `running`.
    ///
    /// The notification text depends on whether the timer had already
    /// expired before this kick. The update only lands on the state that was
    /// read; a concurrent change (e.g. the expiry scanner) forces a re-read.
    pub async fn kick(&self, user_id: UserId, timer_id: TimerId) -> Result<Timer, AppError> {
        for _ in 0..KICK_ATTEMPTS {
            let observed = self.get(user_id, timer_id).await?;
            let now = Utc::now().timestamp();

            if let Some(timer) = self.timer_repo.kick(&observed, now).await? {
                info!(
                    timer_id = %timer.id,
                    user_id = %user_id,
                    prior_state = %observed.state,
                    expiry = timer.expiry,
                    "Timer kicked"
                );

                self.notify(&timer, TimerEvent::for_kick(observed.state)).await;
                return Ok(timer);
            }

            debug!(timer_id = %timer_id, "Timer changed during kick, retrying");
        }

        warn!(timer_id = %timer_id, user_id = %user_id, "Kick lost every race");
        Err(AppError::conflict("Timer is changing too quickly, try again"))
    }

    /// Hard-delete a timer.
    pub async fn delete(&self, user_id: UserId, timer_id: TimerId) -> Result<(), AppError> {
        let timer = self
            .timer_repo
            .delete(timer_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Timer not found"))?;

        info!(timer_id = %timer_id, user_id = %user_id, "Timer deleted");
        self.notify(&timer, TimerEvent::Deleted).await;
        Ok(())
    }

    async fn notify(&self, timer: &Timer, event: TimerEvent) {
        self.notifier
            .notify(timer.user_id, event.message(&timer.name))
            .await;
    }
}
