//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use watchdog_core::types::id::UserId;

/// A user, materialized on first contact from the messaging platform.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name reported by the messaging platform.
    pub display_name: String,
    /// Delivery address on the messaging platform (chat id). Unique.
    pub external_id: Option<String>,
    /// Long-lived access key exchanged for a session credential at login.
    #[serde(skip_serializing)]
    pub access_key: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether notifications can be delivered to this user.
    pub fn has_delivery_address(&self) -> bool {
        self.external_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub display_name: String,
    /// Messaging platform address (optional).
    pub external_id: Option<String>,
    /// Freshly generated access key.
    pub access_key: String,
}
