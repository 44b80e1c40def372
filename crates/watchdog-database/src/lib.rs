//! # watchdog-database
//!
//! SQLite connection management and concrete repository implementations
//! for users and timers. Every mutating repository method is a single
//! statement so the store's own atomicity is the only concurrency control.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
