//! Expiry scanner.
//!
//! Each pass reads a bounded batch of running timers whose expiry has
//! passed and expires them one by one with a conditional update on the
//! observed expiry. A timer kicked after the read keeps running.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use watchdog_core::config::ScannerConfig;
use watchdog_core::error::AppError;
use watchdog_core::traits::Notifier;
use watchdog_database::repositories::TimerRepository;
use watchdog_entity::timer::TimerEvent;

/// Result of one scanner invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The pass ran to completion.
    Completed {
        /// Candidates read from the store.
        examined: usize,
        /// Timers actually moved to `expired`.
        expired: usize,
    },
    /// Another pass was still in flight, so this one did nothing.
    Skipped,
}

impl ScanOutcome {
    /// Number of timers transitioned by this pass.
    pub fn expired(&self) -> usize {
        match self {
            Self::Completed { expired, .. } => *expired,
            Self::Skipped => 0,
        }
    }
}

/// Finds overdue running timers and expires them.
#[derive(Debug)]
pub struct ExpiryScanner {
    /// Timer repository
    timer_repo: Arc<TimerRepository>,
    /// Notification capability
    notifier: Arc<dyn Notifier>,
    /// Maximum candidates per pass
    batch_size: u32,
    /// Held for the duration of a pass
    in_flight: Mutex<()>,
}

impl ExpiryScanner {
    /// Create a new expiry scanner
    pub fn new(
        timer_repo: Arc<TimerRepository>,
        notifier: Arc<dyn Notifier>,
        config: &ScannerConfig,
    ) -> Self {
        Self {
            timer_repo,
            notifier,
            batch_size: config.batch_size.max(1),
            in_flight: Mutex::new(()),
        }
    }

    /// Run one pass against the current time
    pub async fn scan(&self) -> Result<ScanOutcome, AppError> {
        self.scan_at(Utc::now().timestamp()).await
    }

    /// Run one pass treating `now` (unix seconds) as the current time
    pub async fn scan_at(&self, now: i64) -> Result<ScanOutcome, AppError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!("Previous expiry scan still running, skipping");
            return Ok(ScanOutcome::Skipped);
        };

        let candidates = self.timer_repo.find_expired(now, self.batch_size).await?;
        let examined = candidates.len();
        let mut expired = 0;

        for timer in candidates {
            if !timer.is_overdue(now) {
                continue;
            }
            let Some(observed) = timer.expiry else {
                continue;
            };

            match self.timer_repo.mark_expired(timer.id, observed).await {
                Ok(true) => {
                    expired += 1;
                    tracing::info!(
                        timer_id = %timer.id,
                        user_id = %timer.user_id,
                        expiry = observed,
                        "Timer expired"
                    );
                    self.notifier
                        .notify(timer.user_id, TimerEvent::Expired.message(&timer.name))
                        .await;
                }
                Ok(false) => {
                    tracing::debug!(timer_id = %timer.id, "Timer changed since read, not expiring");
                }
                Err(e) => {
                    tracing::error!(timer_id = %timer.id, error = %e, "Failed to expire timer");
                }
            }
        }

        if examined > 0 {
            tracing::info!(examined, count = expired, "Expiry scan complete");
        } else {
            tracing::trace!("Expiry scan found nothing to do");
        }

        Ok(ScanOutcome::Completed { examined, expired })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use super::*;
    use watchdog_core::types::id::UserId;
    use watchdog_database::DatabasePool;
    use watchdog_database::migration::run_migrations;
    use watchdog_database::repositories::UserRepository;
    use watchdog_entity::timer::{Timer, TimerState};
    use watchdog_entity::user::CreateUser;

    #[derive(Debug, Default)]
    struct RecordingNotifier {
        sent: StdMutex<Vec<(UserId, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, user_id: UserId, message: String) {
            self.sent.lock().unwrap().push((user_id, message));
        }
    }

    struct Fixture {
        pool: sqlx::SqlitePool,
        timers: Arc<TimerRepository>,
        notifier: Arc<RecordingNotifier>,
        user: UserId,
    }

    async fn fixture() -> Fixture {
        let db = DatabasePool::in_memory().await.unwrap();
        run_migrations(db.pool()).await.unwrap();
        let pool = db.into_pool();
        let user = UserRepository::new(pool.clone())
            .create(&CreateUser {
                display_name: "alice".to_string(),
                external_id: Some("1".to_string()),
                access_key: "key".to_string(),
            })
            .await
            .unwrap();
        Fixture {
            pool: pool.clone(),
            timers: Arc::new(TimerRepository::new(pool)),
            notifier: Arc::new(RecordingNotifier::default()),
            user: user.id,
        }
    }

    impl Fixture {
        async fn start(&self, name: &str, interval: i64, now: i64) -> Timer {
            let timer = self.timers.create(self.user, name, interval).await.unwrap();
            self.timers.kick(&timer, now).await.unwrap().unwrap()
        }
    }

    fn scanner(f: &Fixture, batch_size: u32) -> ExpiryScanner {
        let config = ScannerConfig {
            batch_size,
            ..ScannerConfig::default()
        };
        ExpiryScanner::new(f.timers.clone(), f.notifier.clone(), &config)
    }

    #[tokio::test]
    async fn test_expires_overdue_running_timers_once() {
        let f = fixture().await;
        f.start("backup", 10, 100).await;
        let fresh = f.timers.create(f.user, "never-kicked", 10).await.unwrap();
        let scanner = scanner(&f, 1000);

        let first = scanner.scan_at(111).await.unwrap();
        assert_eq!(first, ScanOutcome::Completed { examined: 1, expired: 1 });

        let second = scanner.scan_at(112).await.unwrap();
        assert_eq!(second, ScanOutcome::Completed { examined: 0, expired: 0 });

        let sent = f.notifier.sent.lock().unwrap().clone();
        assert_eq!(sent, vec![(f.user, "Timer 'backup' has expired".to_string())]);

        let fresh = f.timers.find_by_id_and_owner(fresh.id, f.user).await.unwrap().unwrap();
        assert_eq!(fresh.state, TimerState::New);
    }

    #[tokio::test]
    async fn test_expiry_boundary_is_strict() {
        let f = fixture().await;
        f.start("edge", 10, 100).await;
        let scanner = scanner(&f, 1000);

        assert_eq!(scanner.scan_at(110).await.unwrap().expired(), 0);
        assert_eq!(scanner.scan_at(111).await.unwrap().expired(), 1);
    }

    #[tokio::test]
    async fn test_kick_before_scan_keeps_timer_running() {
        let f = fixture().await;
        let timer = f.start("backup", 10, 100).await;
        // renewed before the pass reads the row
        f.timers.kick(&timer, 200).await.unwrap().unwrap();

        let outcome = scanner(&f, 1000).scan_at(150).await.unwrap();
        assert_eq!(outcome.expired(), 0);

        let current = f.timers.find_by_id_and_owner(timer.id, f.user).await.unwrap().unwrap();
        assert_eq!(current.state, TimerState::Running);
        assert!(f.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_size_bounds_a_pass() {
        let f = fixture().await;
        for name in ["a", "b", "c"] {
            f.start(name, 10, 100).await;
        }
        let scanner = scanner(&f, 2);

        assert_eq!(scanner.scan_at(500).await.unwrap().expired(), 2);
        assert_eq!(scanner.scan_at(500).await.unwrap().expired(), 1);
        assert_eq!(scanner.scan_at(500).await.unwrap().expired(), 0);
    }

    #[tokio::test]
    async fn test_overlapping_pass_is_skipped() {
        let f = fixture().await;
        f.start("backup", 10, 100).await;
        let scanner = scanner(&f, 1000);

        let guard = scanner.in_flight.lock().await;
        assert_eq!(scanner.scan_at(500).await.unwrap(), ScanOutcome::Skipped);
        drop(guard);

        assert_eq!(scanner.scan_at(500).await.unwrap().expired(), 1);
    }

    #[tokio::test]
    async fn test_failing_row_does_not_stop_the_pass() {
        let f = fixture().await;
        let broken = f.start("broken", 10, 100).await;
        let healthy = f.start("healthy", 10, 100).await;

        sqlx::query(&format!(
            "CREATE TRIGGER reject_update BEFORE UPDATE ON timers WHEN OLD.id = {} \
             BEGIN SELECT RAISE(ABORT, 'row is locked'); END",
            broken.id
        ))
        .execute(&f.pool)
        .await
        .unwrap();

        let outcome = scanner(&f, 1000).scan_at(500).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Completed { examined: 2, expired: 1 });

        let sent = f.notifier.sent.lock().unwrap().clone();
        assert_eq!(sent, vec![(f.user, "Timer 'healthy' has expired".to_string())]);

        let broken = f.timers.find_by_id_and_owner(broken.id, f.user).await.unwrap().unwrap();
        assert_eq!(broken.state, TimerState::Running);
        let healthy = f.timers.find_by_id_and_owner(healthy.id, f.user).await.unwrap().unwrap();
        assert_eq!(healthy.state, TimerState::Expired);
    }
}
