//! Convenience result type alias for Watchdog.

use crate::error::AppError;

/// A specialized `Result` type for Watchdog operations.
pub type AppResult<T> = Result<T, AppError>;
