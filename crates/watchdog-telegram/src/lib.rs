//! # watchdog-telegram
//!
//! Telegram Bot API integration: the HTTP client, a [`MessageSender`]
//! implementation used by the notification dispatcher, and the long-poll
//! listener that answers `/start` with the user's access key.
//!
//! [`MessageSender`]: watchdog_core::traits::MessageSender

pub mod client;
pub mod listener;
pub mod sender;
pub mod types;

pub use client::TelegramClient;
pub use listener::StartListener;
pub use sender::TelegramSender;
