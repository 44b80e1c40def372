//! CLI command definitions and dispatch.

pub mod migrate;
pub mod scan;
pub mod timer;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use watchdog_core::config::AppConfig;
use watchdog_core::error::AppError;
use watchdog_database::DatabasePool;

/// Watchdog: dead-man's-switch timers
#[derive(Debug, Parser)]
#[command(name = "watchdog", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (config/{env}.toml)
    #[arg(short, long, env = "WATCHDOG_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Timer inspection
    Timer(timer::TimerArgs),
    /// Run a single expiry pass
    Scan(scan::ScanArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Timer(args) => timer::execute(args, &config, self.format).await,
            Commands::Scan(args) => scan::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect and bring the schema up to date
pub async fn open_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    watchdog_database::migration::run_migrations(db.pool()).await?;
    Ok(db)
}
