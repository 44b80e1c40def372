//! Periodic scheduler for the expiry scanner.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use watchdog_core::error::AppError;

use crate::jobs::{ExpiryScanner, ScanOutcome};

/// Runs [`ExpiryScanner`] passes at a fixed cadence.
pub struct ExpiryScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Scanner invoked on every tick
    scanner: Arc<ExpiryScanner>,
    /// Seconds between ticks
    interval: Duration,
}

impl std::fmt::Debug for ExpiryScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiryScheduler")
            .field("interval", &self.interval)
            .finish()
    }
}

impl ExpiryScheduler {
    /// Create a new scheduler that scans every `interval_seconds` (at least 1).
    pub async fn new(scanner: Arc<ExpiryScanner>, interval_seconds: u64) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            scanner,
            interval: Duration::from_secs(interval_seconds.max(1)),
        })
    }

    /// Register the scan job and start ticking
    pub async fn start(&self) -> Result<(), AppError> {
        let scanner = Arc::clone(&self.scanner);
        let job = CronJob::new_repeated_async(self.interval, move |_uuid, _lock| {
            let scanner = Arc::clone(&scanner);
            Box::pin(async move {
                match scanner.scan().await {
                    Ok(ScanOutcome::Skipped) => {
                        tracing::warn!("Expiry scan tick skipped, previous pass still running");
                    }
                    Ok(ScanOutcome::Completed { .. }) => {}
                    Err(e) => tracing::error!(error = %e, "Expiry scan failed"),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create expiry schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add expiry schedule: {e}")))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            "Expiry scheduler started"
        );
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Expiry scheduler shut down");
        Ok(())
    }
}
