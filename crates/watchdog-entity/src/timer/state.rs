//! Timer lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a timer.
///
/// `New` and `Expired` timers move to `Running` on a kick, and a `Running`
/// timer moves to `Expired` when the scanner sees it past its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Created but never kicked; `expiry` carries no meaning.
    New,
    /// Kicked and counting down to `expiry`.
    Running,
    /// Observed past its expiry by the scanner.
    Expired,
}

impl TimerState {
    /// State after a kick. Every state may be kicked.
    pub fn kicked(self) -> Self {
        match self {
            Self::New | Self::Running | Self::Expired => Self::Running,
        }
    }

    /// Whether the scanner may move this state to `Expired`.
    pub fn can_expire(self) -> bool {
        match self {
            Self::Running => true,
            Self::New | Self::Expired => false,
        }
    }

    /// Whether the stored expiry is meaningful in this state.
    pub fn has_expiry(self) -> bool {
        match self {
            Self::New => false,
            Self::Running | Self::Expired => true,
        }
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Running => "running",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
