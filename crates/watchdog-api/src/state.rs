//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use watchdog_core::config::AppConfig;
use watchdog_database::DatabasePool;
use watchdog_service::{AccessService, TimerService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Database pool, used by the health check
    pub db: DatabasePool,
    /// Timer lifecycle
    pub timer_service: Arc<TimerService>,
    /// Credential issuance and resolution
    pub access_service: Arc<AccessService>,
    /// Deep link that starts a chat with the bot, when a bot is configured
    pub bot_login_url: Option<String>,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(
        config: Arc<AppConfig>,
        db: DatabasePool,
        timer_service: Arc<TimerService>,
        access_service: Arc<AccessService>,
        bot_login_url: Option<String>,
    ) -> Self {
        Self {
            config,
            db,
            timer_service,
            access_service,
            bot_login_url,
        }
    }
}
