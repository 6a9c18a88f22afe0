//! Error types for the calfeed engine.
//!
//! Feed content never produces an error: malformed lines and dates degrade to
//! fallbacks. Only option values a caller hands in directly can be rejected.

use thiserror::Error;

/// Errors that can occur when building agenda options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalFeedError {
    #[error("Invalid day count {0}: expected 1..={max}", max = crate::agenda::MAX_DAYS)]
    InvalidDays(u32),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Result type alias for calfeed operations.
pub type CalFeedResult<T> = Result<T, CalFeedError>;
