//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use watchdog_core::config::AppConfig;
use watchdog_core::error::AppError;
use watchdog_database::repositories::UserRepository;
use watchdog_entity::user::User;
use watchdog_service::UserService;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user and print its access key
    Add {
        /// Display name
        display_name: String,
        /// Messaging platform address (Telegram chat id)
        #[arg(long)]
        external_id: Option<String>,
    },
    /// Look up a user
    Show {
        /// Find by access key
        #[arg(long, conflicts_with = "external_id", required_unless_present = "external_id")]
        key: Option<String>,
        /// Find by messaging platform address
        #[arg(long)]
        external_id: Option<String>,
    },
}

/// User details, including the access key.
#[derive(Debug, Serialize)]
struct UserView {
    id: i64,
    display_name: String,
    external_id: Option<String>,
    access_key: String,
    created_at: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            display_name: user.display_name,
            external_id: user.external_id,
            access_key: user.access_key,
            created_at: user.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::open_database(config).await?;
    let users = UserService::new(Arc::new(UserRepository::new(db.pool().clone())));

    match &args.command {
        UserCommand::Add {
            display_name,
            external_id,
        } => {
            let user = users
                .create_user(display_name, external_id.as_deref())
                .await?;
            if format == OutputFormat::Table {
                output::print_success(&format!("User '{}' created", user.display_name));
            }
            output::print_item(&UserView::from(user), format);
        }
        UserCommand::Show { key, external_id } => {
            let user = match (key, external_id) {
                (Some(key), _) => users.find_by_access_key(key).await?,
                (None, Some(external_id)) => users.find_by_external_id(external_id).await?,
                (None, None) => return Err(AppError::validation("Pass --key or --external-id")),
            };
            output::print_item(&UserView::from(user), format);
        }
    }

    db.close().await;
    Ok(())
}
