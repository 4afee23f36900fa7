//! Display status derivation.
//!
//! A record is in exactly one of three lifecycle states (done, running,
//! scheduled). Overdue decorates the scheduled state and is never evaluated
//! for done or running records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TaskRecord, parse_timestamp};

/// Label shown for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting for its scheduled time.
    Scheduled,
    /// Scheduled time has passed but execution has not started.
    Overdue,
    /// Execution has started and not finished.
    Running,
    /// Execution has finished or the task was marked done.
    Done,
}

impl TaskStatus {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Overdue => "Overdue",
            Self::Running => "Running",
            Self::Done => "Done",
        }
    }

    /// Returns the canonical machine representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Overdue => "overdue",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of status derivation for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStatus {
    /// Label to display.
    pub status: TaskStatus,
    /// Whether the task has completed.
    pub done: bool,
    /// Whether the task is executing.
    pub running: bool,
    /// Whether a scheduled task has missed its start time.
    pub overdue: bool,
}

impl DerivedStatus {
    /// Returns `true` when the task is neither done nor running.
    #[must_use]
    pub const fn is_scheduled(self) -> bool {
        !self.done && !self.running
    }
}

/// Derives the display status of `record` as of `now`.
///
/// Unparsable or absent timestamps count as "not set", which biases a record
/// toward [`TaskStatus::Scheduled`] and never toward done or running.
#[must_use]
pub fn derive_status(record: &TaskRecord, now: NaiveDateTime) -> DerivedStatus {
    let scheduled_at = parse_timestamp(&record.scheduled_time);
    let started = record
        .start_time
        .as_deref()
        .and_then(parse_timestamp)
        .is_some();
    let ended = record
        .end_time
        .as_deref()
        .and_then(parse_timestamp)
        .is_some();

    let done = record.is_done();
    let running = started && !ended && !done;
    let scheduled = !running && !done;
    let overdue = scheduled && scheduled_at.is_some_and(|at| now > at);

    let status = if done {
        TaskStatus::Done
    } else if running {
        TaskStatus::Running
    } else if overdue {
        TaskStatus::Overdue
    } else {
        TaskStatus::Scheduled
    };

    DerivedStatus {
        status,
        done,
        running,
        overdue,
    }
}
