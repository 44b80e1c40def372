//! Notification dispatcher.
//!
//! Resolves a user to their messaging address and hands the message to a
//! [`MessageSender`], by default on a spawned task. Callers never observe
//! delivery outcomes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use watchdog_core::traits::{MessageSender, Notifier};
use watchdog_core::types::id::UserId;
use watchdog_database::repositories::UserRepository;

/// Fire-and-forget [`Notifier`] backed by a messaging platform.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    /// User repository for address lookup.
    user_repo: Arc<UserRepository>,
    /// Delivery channel.
    sender: Arc<dyn MessageSender>,
    /// Send on a spawned task instead of awaiting delivery.
    detached: bool,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(user_repo: Arc<UserRepository>, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            user_repo,
            sender,
            detached: true,
        }
    }

    /// Await each delivery inside `notify`.
    ///
    /// For short-lived processes that would otherwise exit before a
    /// spawned send completes.
    pub fn with_inline_delivery(mut self) -> Self {
        self.detached = false;
        self
    }
}

async fn deliver(sender: &dyn MessageSender, user_id: UserId, address: &str, message: &str) {
    if let Err(e) = sender.send(address, message).await {
        warn!(
            user_id = %user_id,
            channel = sender.channel(),
            error = %e,
            "Notification delivery failed"
        );
    }
}

#[async_trait]
impl Notifier for NotificationDispatcher {
    async fn notify(&self, user_id: UserId, message: String) {
        let address = match self.user_repo.find_external_id(user_id).await {
            Ok(Some(address)) if !address.is_empty() => address,
            Ok(_) => {
                debug!(user_id = %user_id, "User has no delivery address, skipping notification");
                return;
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to resolve delivery address");
                return;
            }
        };

        if !self.detached {
            deliver(self.sender.as_ref(), user_id, &address, &message).await;
            return;
        }

        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move {
            deliver(sender.as_ref(), user_id, &address, &message).await;
        });
    }
}
