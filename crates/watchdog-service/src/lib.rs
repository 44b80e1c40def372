//! # watchdog-service
//!
//! Business logic service layer for Watchdog. Each service orchestrates
//! repositories, credential primitives, and the notification capability to
//! implement application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod notification;
pub mod timer;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{AccessService, ActionToken, LoginCredential};
pub use notification::NotificationDispatcher;
pub use timer::{NewTimer, TimerService};
pub use user::UserService;
