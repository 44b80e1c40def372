//! Background expiry detection for Watchdog.
//!
//! This crate provides:
//! - An expiry scanner that moves overdue running timers to expired
//! - A scheduler that runs the scanner at a fixed cadence

pub mod jobs;
pub mod scheduler;

pub use jobs::{ExpiryScanner, ScanOutcome};
pub use scheduler::ExpiryScheduler;
