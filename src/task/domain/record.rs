//! Raw task record as reported by the service.

use mockable::Clock;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{DerivedStatus, TaskId, derive_status, parse_timestamp};

/// A scheduled task as the service reports it.
///
/// Field values are kept as received; interpretation (timestamp parsing,
/// completion) happens on read so a malformed field never rejects the whole
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Service-assigned identifier.
    pub id: TaskId,
    /// Display name.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    /// When the task is intended to start.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub scheduled_time: String,
    /// Planned run length in seconds.
    #[serde(
        default,
        deserialize_with = "non_negative_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_sec: Option<u64>,
    /// When the service registered the task.
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub arrival_time: Option<String>,
    /// When execution began.
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<String>,
    /// When execution completed.
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<String>,
    /// Completion flag, redundant with [`TaskRecord::end_time`].
    #[serde(default, deserialize_with = "truthy_flag")]
    pub done: bool,
}

impl TaskRecord {
    /// Creates a record with the required fields and nothing else set.
    #[must_use]
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        scheduled_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scheduled_time: scheduled_time.into(),
            duration_sec: None,
            arrival_time: None,
            start_time: None,
            end_time: None,
            done: false,
        }
    }

    /// Sets the planned duration.
    #[must_use]
    pub const fn with_duration(mut self, duration_sec: u64) -> Self {
        self.duration_sec = Some(duration_sec);
        self
    }

    /// Sets the execution start time.
    #[must_use]
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Sets the execution end time.
    #[must_use]
    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Returns `true` when the task has completed.
    ///
    /// A record is complete when it carries a readable end time or a truthy
    /// completion flag. This is the only place the two signals are combined.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done || self.end_time.as_deref().and_then(parse_timestamp).is_some()
    }

    /// Derives the display status against the clock's current local time.
    #[must_use]
    pub fn status(&self, clock: &impl Clock) -> DerivedStatus {
        derive_status(self, clock.local().naive_local())
    }

    /// Returns the planned run time label, shown only for positive durations.
    #[must_use]
    pub fn duration_label(&self) -> Option<String> {
        self.duration_sec
            .filter(|seconds| *seconds > 0)
            .map(|seconds| format!("{seconds}s"))
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn non_negative_integer<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64))
}

fn truthy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(number)) => number
            .as_i64()
            .map_or_else(|| number.as_f64().is_some_and(f64::is_normal), |n| n != 0),
        Some(Value::String(text)) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}
