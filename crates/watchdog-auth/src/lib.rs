//! # watchdog-auth
//!
//! Credential primitives for Watchdog.
//!
//! ## Modules
//!
//! - `jwt`: HS256 session credentials and timer-scoped action tokens
//! - `access_key`: long-lived access key generation

pub mod access_key;
pub mod jwt;

pub use access_key::generate_access_key;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
