//! Expiry scanner configuration.

use serde::{Deserialize, Serialize};

/// Periodic expiry scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Whether the periodic scan runs inside the server process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between scan passes.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Maximum number of timers examined per pass.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_interval(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    3
}

fn default_batch_size() -> u32 {
    1000
}
