//! # watchdog-api
//!
//! HTTP API layer for Watchdog built on Axum.
//!
//! Provides the login, timer management, kick-link, and health endpoints,
//! request logging and CORS middleware, the session extractor, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
