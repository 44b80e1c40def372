//! Timer inspection commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use watchdog_core::config::AppConfig;
use watchdog_core::error::AppError;
use watchdog_database::repositories::{TimerRepository, UserRepository};
use watchdog_entity::timer::Timer;
use watchdog_service::UserService;

/// Arguments for timer commands
#[derive(Debug, Args)]
pub struct TimerArgs {
    /// Timer subcommand
    #[command(subcommand)]
    pub command: TimerCommand,
}

/// Timer subcommands
#[derive(Debug, Subcommand)]
pub enum TimerCommand {
    /// List the timers of the user holding an access key
    List {
        /// Access key
        #[arg(long)]
        key: String,
    },
}

/// Timer display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TimerRow {
    /// Timer ID
    id: i64,
    /// Name
    name: String,
    /// Interval in seconds
    interval: i64,
    /// State
    state: String,
    /// Expiry
    expiry: String,
}

impl From<Timer> for TimerRow {
    fn from(timer: Timer) -> Self {
        let expiry = timer
            .expires_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        Self {
            id: timer.id.0,
            name: timer.name,
            interval: timer.interval,
            state: timer.state.to_string(),
            expiry,
        }
    }
}

/// Execute timer commands
pub async fn execute(
    args: &TimerArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::open_database(config).await?;

    match &args.command {
        TimerCommand::List { key } => {
            let users = UserService::new(Arc::new(UserRepository::new(db.pool().clone())));
            let user = users.find_by_access_key(key).await?;

            let timers = TimerRepository::new(db.pool().clone())
                .find_by_owner(user.id)
                .await?;
            let rows: Vec<TimerRow> = timers.into_iter().map(TimerRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    db.close().await;
    Ok(())
}
