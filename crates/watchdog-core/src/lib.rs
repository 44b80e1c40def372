//! # watchdog-core
//!
//! Core crate for Watchdog. Contains configuration schemas, typed
//! identifiers, the notification traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Watchdog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
