//! Job implementations.

pub mod expiry;

pub use expiry::{ExpiryScanner, ScanOutcome};
