//! Notification traits.
//!
//! [`Notifier`] is the capability the timer lifecycle depends on: tell a
//! user something happened. [`MessageSender`] is the lower-level delivery
//! channel a notifier uses to reach an external address.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Best-effort "notify user of event" capability.
///
/// Delivery failures are absorbed by the implementation and never reach
/// the caller.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver `message` to the user identified by `user_id`.
    async fn notify(&self, user_id: UserId, message: String);
}

/// Delivery channel to an external messaging platform.
#[async_trait]
pub trait MessageSender: Send + Sync + std::fmt::Debug + 'static {
    /// Return the channel name (e.g. "telegram").
    fn channel(&self) -> &str;

    /// Send `text` to `address` on the platform.
    async fn send(&self, address: &str, text: &str) -> AppResult<()>;
}

/// Sender used when no messaging platform is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSender;

#[async_trait]
impl MessageSender for NoopSender {
    fn channel(&self) -> &str {
        "noop"
    }

    async fn send(&self, address: &str, text: &str) -> AppResult<()> {
        tracing::debug!(address = %address, text = %text, "Messaging disabled, dropping message");
        Ok(())
    }
}
