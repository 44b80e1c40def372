//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use watchdog_entity::timer::{Timer, TimerState};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Timer as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    /// Timer id.
    pub timerid: i64,
    /// Name.
    pub name: String,
    /// Kick interval in seconds.
    pub interval: i64,
    /// Expiry as unix seconds; absent while the timer is `new`.
    pub expiry: Option<i64>,
    /// Lifecycle state.
    pub state: TimerState,
}

impl From<Timer> for TimerResponse {
    fn from(timer: Timer) -> Self {
        let expiry = timer.expires_at().map(|at| at.timestamp());
        Self {
            timerid: timer.id.get(),
            name: timer.name,
            interval: timer.interval,
            expiry,
            state: timer.state,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session credential, also set as a cookie.
    pub token: String,
    /// Credential expiration.
    pub expires_at: DateTime<Utc>,
}

/// Action token response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTokenResponse {
    /// Signed token.
    pub token: String,
    /// Path that kicks the timer without a session.
    pub kick_url: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
    /// Bot deep link for obtaining an access key.
    pub bot_login_url: Option<String>,
}
