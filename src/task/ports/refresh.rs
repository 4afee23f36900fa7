//! Change notifications fired after task mutations.

use crate::task::domain::TaskRecord;

/// Observer of successful mutations.
pub trait TaskChangeListener: Send + Sync {
    /// Called after every successful mutation, with the created record for
    /// an add and `None` otherwise.
    fn on_task_change(&self, created: Option<&TaskRecord>);
}
