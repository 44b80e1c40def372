//! `/start` listener.
//!
//! Long-polls `getUpdates`. A `/start` message registers the sender's chat
//! as a user (or finds the existing one) and replies with the access key.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use watchdog_core::error::AppError;
use watchdog_service::UserService;

use crate::client::TelegramClient;
use crate::types::Message;

/// Delay before polling again after a failed `getUpdates`.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Answers `/start` with the user's access key.
#[derive(Debug)]
pub struct StartListener {
    client: Arc<TelegramClient>,
    users: Arc<UserService>,
    poll_timeout: u64,
}

impl StartListener {
    /// Create a listener polling with `poll_timeout` seconds per request.
    pub fn new(client: Arc<TelegramClient>, users: Arc<UserService>, poll_timeout: u64) -> Self {
        Self {
            client,
            users,
            poll_timeout,
        }
    }

    /// Poll until `shutdown` flips to `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("Telegram listener started");
        let mut offset = 0;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let polled = tokio::select! {
                _ = shutdown.changed() => break,
                polled = self.client.get_updates(offset, self.poll_timeout) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        if let Some(message) = update.message {
                            self.handle_message(&message).await;
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Polling Telegram failed");
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }
        }

        info!("Telegram listener stopped");
    }

    /// Handle one incoming message. Anything but `/start` is ignored.
    pub async fn handle_message(&self, message: &Message) {
        let Some(text) = message.text.as_deref() else {
            return;
        };
        if !is_start_command(text) {
            return;
        }

        let chat_id = message.chat.id.to_string();
        if let Err(e) = self.reply_with_key(message, &chat_id).await {
            warn!(chat_id = %chat_id, error = %e, "Failed to answer /start");
        }
    }

    async fn reply_with_key(&self, message: &Message, chat_id: &str) -> Result<(), AppError> {
        let display_name = message
            .from
            .as_ref()
            .map(|from| from.display_name())
            .unwrap_or_else(|| chat_id.to_string());

        let (user, created) = self.users.register_contact(&display_name, chat_id).await?;
        self.client
            .send_message(chat_id, &key_reply(&user.access_key, created))
            .await?;
        Ok(())
    }
}

/// Whether `text` is the `/start` command, optionally addressed to a bot
/// (`/start@name`) or carrying a payload.
pub fn is_start_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .map(|cmd| cmd.split('@').next().unwrap_or(cmd))
        .is_some_and(|cmd| cmd == "/start")
}

/// Reply text carrying an access key.
pub fn key_reply(access_key: &str, created: bool) -> String {
    if created {
        format!("Welcome! Your access key:\n{access_key}")
    } else {
        format!("Here's your access key:\n{access_key}")
    }
}

/// Deep link that opens a chat with the bot and sends `/start`.
pub fn login_url(bot_username: &str) -> String {
    format!("https://telegram.me/{bot_username}?start")
}
