//! Core traits defined in `watchdog-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{MessageSender, NoopSender, Notifier};
