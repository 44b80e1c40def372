//! [`MessageSender`] backed by the Telegram Bot API.

use std::sync::Arc;

use async_trait::async_trait;

use watchdog_core::result::AppResult;
use watchdog_core::traits::MessageSender;

use crate::client::TelegramClient;

/// Delivers notifications as Telegram chat messages.
#[derive(Debug, Clone)]
pub struct TelegramSender {
    client: Arc<TelegramClient>,
}

impl TelegramSender {
    /// Wrap a client.
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    fn channel(&self) -> &str {
        "telegram"
    }

    async fn send(&self, address: &str, text: &str) -> AppResult<()> {
        self.client.send_message(address, text).await.map(|_| ())
    }
}
