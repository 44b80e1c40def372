//! Timer repository implementation.
//!
//! Every query that touches a single timer on behalf of a user is scoped by
//! `(id, user_id)`, so a timer owned by someone else is indistinguishable
//! from one that does not exist.

use chrono::Utc;
use sqlx::SqlitePool;

use watchdog_core::error::{AppError, ErrorKind};
use watchdog_core::result::AppResult;
use watchdog_core::types::id::{TimerId, UserId};
use watchdog_entity::timer::{Timer, TimerState};

/// Repository for timer lifecycle queries.
#[derive(Debug, Clone)]
pub struct TimerRepository {
    pool: SqlitePool,
}

impl TimerRepository {
    /// Create a new timer repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a timer in state `new` with no expiry.
    pub async fn create(&self, user_id: UserId, name: &str, interval: i64) -> AppResult<Timer> {
        let now = Utc::now();
        sqlx::query_as::<_, Timer>(
            "INSERT INTO timers (user_id, name, interval, expiry, state, created_at, updated_at) \
             VALUES (?, ?, ?, NULL, ?, ?, ?) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .bind(interval)
        .bind(TimerState::New)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create timer", e))
    }

    /// Find a timer by id, scoped to its owner.
    pub async fn find_by_id_and_owner(
        &self,
        id: TimerId,
        user_id: UserId,
    ) -> AppResult<Option<Timer>> {
        sqlx::query_as::<_, Timer>("SELECT * FROM timers WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find timer", e))
    }

    /// List every timer owned by a user, ordered by id.
    pub async fn find_by_owner(&self, user_id: UserId) -> AppResult<Vec<Timer>> {
        sqlx::query_as::<_, Timer>("SELECT * FROM timers WHERE user_id = ? ORDER BY id ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list timers", e))
    }

    /// Kick a timer the caller has just read: `expiry = now + interval` and
    /// the state that follows `observed.state`.
    ///
    /// The update only applies while the row still carries the observed
    /// state and expiry, so a concurrent expiry or kick makes it match
    /// nothing and return `None`. A missing or foreign row also yields `None`.
    pub async fn kick(&self, observed: &Timer, now: i64) -> AppResult<Option<Timer>> {
        sqlx::query_as::<_, Timer>(
            "UPDATE timers SET expiry = ? + interval, state = ?, updated_at = ? \
             WHERE id = ? AND user_id = ? AND state = ? AND expiry IS ? \
             RETURNING *",
        )
        .bind(now)
        .bind(observed.state.kicked())
        .bind(Utc::now())
        .bind(observed.id)
        .bind(observed.user_id)
        .bind(observed.state)
        .bind(observed.expiry)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to kick timer", e))
    }

    /// Hard-delete a timer, returning the removed row.
    pub async fn delete(&self, id: TimerId, user_id: UserId) -> AppResult<Option<Timer>> {
        sqlx::query_as::<_, Timer>("DELETE FROM timers WHERE id = ? AND user_id = ? RETURNING *")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete timer", e))
    }

    /// Running timers whose expiry is strictly before `now`, oldest first.
    pub async fn find_expired(&self, now: i64, limit: u32) -> AppResult<Vec<Timer>> {
        sqlx::query_as::<_, Timer>(
            "SELECT * FROM timers WHERE state = ? AND expiry < ? \
             ORDER BY expiry ASC, id ASC LIMIT ?",
        )
        .bind(TimerState::Running)
        .bind(now)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query expired timers", e)
        })
    }

    /// Move a timer to `expired` only if it is still running with the
    /// expiry the caller observed.
    ///
    /// A kick that lands between the read and this update changes the
    /// expiry, so the update matches nothing and returns `false`.
    pub async fn mark_expired(&self, id: TimerId, observed_expiry: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE timers SET state = ?, updated_at = ? \
             WHERE id = ? AND expiry = ? AND state = ?",
        )
        .bind(TimerState::Expired)
        .bind(Utc::now())
        .bind(id)
        .bind(observed_expiry)
        .bind(TimerState::Running)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to expire timer", e))?;

        Ok(result.rows_affected() == 1)
    }

}
