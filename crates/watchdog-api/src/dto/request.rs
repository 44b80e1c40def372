//! Request DTOs.

use serde::{Deserialize, Serialize};

use watchdog_service::NewTimer;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Access key delivered by the bot.
    #[serde(default)]
    pub key: String,
}

/// Create timer request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimerRequest {
    /// Timer name.
    pub name: String,
    /// Kick interval in seconds.
    pub interval: i64,
}

impl From<CreateTimerRequest> for NewTimer {
    fn from(req: CreateTimerRequest) -> Self {
        NewTimer {
            name: req.name,
            interval: req.interval,
        }
    }
}
