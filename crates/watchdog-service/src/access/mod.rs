//! Access layer: login, session resolution, and action tokens.

pub mod service;

pub use service::{AccessService, ActionToken, LoginCredential};
