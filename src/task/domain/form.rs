//! New task form input and its validated payload.

use serde::{Deserialize, Serialize};

use super::TaskValidationError;

/// Raw field values entered for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskForm {
    /// Task name.
    pub name: String,
    /// Scheduled start, e.g. `2024-01-01T10:00`.
    pub scheduled_time: String,
    /// Planned duration in seconds, as typed.
    pub duration: String,
}

impl NewTaskForm {
    /// Creates a form from raw field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        scheduled_time: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            scheduled_time: scheduled_time.into(),
            duration: duration.into(),
        }
    }

    /// Validates the fields and builds the create payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when a field is missing or the
    /// duration is not a non-negative integer.
    pub fn validate(&self) -> Result<NewTask, TaskValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TaskValidationError::MissingName);
        }

        let scheduled_time = self.scheduled_time.trim();
        if scheduled_time.is_empty() {
            return Err(TaskValidationError::MissingScheduledTime);
        }

        let duration = self.duration.trim();
        if duration.is_empty() {
            return Err(TaskValidationError::MissingDuration);
        }
        let seconds: i64 = duration
            .parse()
            .map_err(|_| TaskValidationError::InvalidDuration(duration.to_owned()))?;
        let duration_sec =
            u64::try_from(seconds).map_err(|_| TaskValidationError::NegativeDuration(seconds))?;

        Ok(NewTask {
            name: name.to_owned(),
            scheduled_time: scheduled_time.to_owned(),
            duration_sec,
        })
    }
}

/// Validated create payload sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task name.
    pub name: String,
    /// Scheduled start as entered.
    pub scheduled_time: String,
    /// Planned duration in seconds.
    pub duration_sec: u64,
}
