//! # watchdog-entity
//!
//! Domain entity models for Watchdog. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod timer;
pub mod user;
