//! Render-ready task rows.

use super::{DerivedStatus, TaskRecord};

/// A task record paired with its derived status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Underlying record.
    pub record: TaskRecord,
    /// Status derived at render time.
    pub status: DerivedStatus,
}

impl TaskRow {
    /// Returns `true` when the name should be struck through.
    #[must_use]
    pub const fn struck_through(&self) -> bool {
        self.status.done
    }

    /// Returns `true` when the row should be dimmed as overdue.
    #[must_use]
    pub const fn dimmed(&self) -> bool {
        self.status.overdue
    }

    /// Returns `true` when the "mark done" action is available.
    #[must_use]
    pub const fn can_mark_done(&self) -> bool {
        !self.status.done
    }
}
