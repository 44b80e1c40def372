//! JWT claims carried by session credentials and action tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use watchdog_core::types::id::{TimerId, UserId};

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Timer the token is scoped to. Present only on action tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<TimerId>,
    /// Token type.
    pub typ: TokenType,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Distinguishes session credentials from action tokens so one can never
/// be replayed as the other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Bearer credential for the management API.
    Session,
    /// Credential that can only kick one timer.
    Kick,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
