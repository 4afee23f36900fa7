//! Error types for task form validation.

use thiserror::Error;

/// Errors returned while validating the fields of a new task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    MissingName,

    /// No scheduled time was given.
    #[error("scheduled time must not be empty")]
    MissingScheduledTime,

    /// No duration was given.
    #[error("duration must not be empty")]
    MissingDuration,

    /// The duration is not an integer number of seconds.
    #[error("invalid duration '{0}', expected whole seconds")]
    InvalidDuration(String),

    /// The duration is negative.
    #[error("duration must not be negative, got {0}")]
    NegativeDuration(i64),
}
