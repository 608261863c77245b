//! Error types for setpoint schedules.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised while building a schedule.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a schedule constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
