//! Telegram bot configuration.

use serde::{Deserialize, Serialize};

/// Telegram Bot API configuration.
///
/// An empty `bot_token` disables the bot entirely; notifications then
/// become no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    #[serde(default)]
    pub bot_token: String,
    /// Bot API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll timeout for `getUpdates`, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_api_url(),
            poll_timeout_seconds: default_poll_timeout(),
        }
    }
}

impl TelegramConfig {
    /// Whether a bot token is configured.
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.trim().is_empty()
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    10
}
