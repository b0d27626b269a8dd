//! Error types for boundary functions.
//!
//! Only malformed input surfaces here. "No solution" outcomes (no free
//! slot, exhausted pool, empty cell) are ordinary return values.

use thiserror::Error;

/// Errors raised by the engine's boundary functions.
#[derive(Debug, Error)]
pub enum StandupError {
    /// A time string is not a valid 24h `HH:MM`.
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// A minute offset lies outside a single day.
    #[error("minute offset {0} is outside 0..=1440")]
    TimeOutOfRange(i32),

    /// An interval whose end is not after its start.
    #[error("invalid interval [{start}, {end}): end must be after start")]
    InvalidInterval { start: i32, end: i32 },

    /// A duration that is zero or negative.
    #[error("invalid duration {0} min: must be positive")]
    InvalidDuration(i32),

    /// A personal schedule entry with missing or inconsistent times.
    #[error("schedule entry '{id}': {reason}")]
    InvalidScheduleEntry { id: String, reason: String },

    /// A batch operation was stopped through its cancellation token.
    #[error("operation cancelled")]
    Cancelled,

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl StandupError {
    /// Whether this is a user-initiated stop rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, StandupError>;
