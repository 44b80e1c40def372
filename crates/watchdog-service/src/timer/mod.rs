//! Timer lifecycle operations.

pub mod service;

pub use service::{NewTimer, TimerService};
