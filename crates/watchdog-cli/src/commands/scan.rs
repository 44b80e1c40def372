//! One-shot expiry pass.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use watchdog_core::config::AppConfig;
use watchdog_core::error::AppError;
use watchdog_core::traits::{MessageSender, NoopSender, Notifier};
use watchdog_database::repositories::{TimerRepository, UserRepository};
use watchdog_service::NotificationDispatcher;
use watchdog_telegram::{TelegramClient, TelegramSender};
use watchdog_worker::{ExpiryScanner, ScanOutcome};

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Maximum timers to expire in this pass (defaults to the configured batch size)
    #[arg(long)]
    pub batch_size: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ScanSummary {
    examined: usize,
    expired: usize,
}

/// Execute a single scan, delivering notifications before returning
pub async fn execute(
    args: &ScanArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::open_database(config).await?;

    let sender: Arc<dyn MessageSender> = if config.telegram.is_enabled() {
        let client = Arc::new(TelegramClient::new(&config.telegram)?);
        Arc::new(TelegramSender::new(client))
    } else {
        Arc::new(NoopSender)
    };
    let notifier: Arc<dyn Notifier> = Arc::new(
        NotificationDispatcher::new(Arc::new(UserRepository::new(db.pool().clone())), sender)
            .with_inline_delivery(),
    );

    let mut scanner_config = config.scanner.clone();
    if let Some(batch_size) = args.batch_size {
        scanner_config.batch_size = batch_size;
    }

    let scanner = ExpiryScanner::new(
        Arc::new(TimerRepository::new(db.pool().clone())),
        notifier,
        &scanner_config,
    );

    let summary = match scanner.scan().await? {
        ScanOutcome::Completed { examined, expired } => ScanSummary { examined, expired },
        ScanOutcome::Skipped => ScanSummary {
            examined: 0,
            expired: 0,
        },
    };

    if format == OutputFormat::Table {
        output::print_success(&format!("Expired {} timer(s)", summary.expired));
    }
    output::print_item(&summary, format);

    db.close().await;
    Ok(())
}
