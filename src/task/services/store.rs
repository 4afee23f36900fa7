//! Ordered task list backing the current view.

use mockable::Clock;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::task::domain::{TaskId, TaskRecord, TaskRow};

/// Thread-safe, ordered collection of the task records currently shown.
///
/// The service's list is authoritative: [`TaskStore::replace_all`] drops any
/// provisional entries the payload does not contain. The one exception is a
/// task being deleted: from [`TaskStore::remove_local`] until the deletion
/// is rolled back, or until a list without it lands after confirmation, the
/// id stays hidden no matter which refetch arrives. Once the owning view
/// detaches, every write is discarded so late responses cannot mutate state.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<TaskRecord>,
    /// Deletions sent but not yet answered.
    deleting: HashSet<TaskId>,
    /// Confirmed deletions not yet absent from an applied list.
    deleted: HashSet<TaskId>,
    detached: bool,
    revision: u64,
}

/// A record taken out by [`TaskStore::remove_local`], kept for rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTask {
    index: usize,
    record: TaskRecord,
}

impl RemovedTask {
    /// Returns the position the record occupied.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the removed record.
    #[must_use]
    pub const fn record(&self) -> &TaskRecord {
        &self.record
    }
}

impl TaskStore {
    /// Creates an empty, attached store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `apply` against the state unless the store is detached.
    fn write<R>(&self, apply: impl FnOnce(&mut StoreState) -> R) -> Option<R> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.detached {
            return None;
        }
        let result = apply(&mut state);
        state.revision += 1;
        Some(result)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the whole list with an authoritative payload, keeping its
    /// order.
    ///
    /// Records whose deletion is in flight, or confirmed but still listed by
    /// a response that was sent earlier, are left out. Returns `false` when
    /// the store is detached and nothing changed.
    pub fn replace_all(&self, mut records: Vec<TaskRecord>) -> bool {
        self.write(|state| {
            state
                .deleted
                .retain(|id| records.iter().any(|record| &record.id == id));
            records.retain(|record| {
                !state.deleting.contains(&record.id) && !state.deleted.contains(&record.id)
            });
            state.records = records;
        })
        .is_some()
    }

    /// Prepends a provisional record.
    ///
    /// The record is not tracked; the next [`TaskStore::replace_all`]
    /// supersedes it. Returns `false` when the store is detached.
    pub fn insert_optimistic(&self, record: TaskRecord) -> bool {
        self.write(|state| {
            state.deleted.remove(&record.id);
            state.records.insert(0, record);
        })
        .is_some()
    }

    /// Removes every record with `id` immediately and keeps the id hidden
    /// until the deletion is confirmed or rolled back.
    ///
    /// Returns the first removed record and its position, or `None` when no
    /// record matched or the store is detached.
    pub fn remove_local(&self, id: &TaskId) -> Option<RemovedTask> {
        self.write(|state| {
            state.deleting.insert(id.clone());
            let index = state.records.iter().position(|record| &record.id == id)?;
            let record = state.records.remove(index);
            state.records.retain(|other| &other.id != id);
            Some(RemovedTask { index, record })
        })
        .flatten()
    }

    /// Records that the service accepted the deletion of `id`.
    ///
    /// The id stays hidden until an applied list no longer contains it, so
    /// a refetch answered before the deletion cannot bring it back. Returns
    /// `false` when the store is detached.
    pub fn confirm_removed(&self, id: &TaskId) -> bool {
        self.write(|state| {
            state.deleting.remove(id);
            state.deleted.insert(id.clone());
        })
        .is_some()
    }

    /// Stops hiding `id` after a failed deletion that had nothing to
    /// restore. The next refetch shows it again.
    ///
    /// Returns `false` when the store is detached.
    pub fn cancel_removal(&self, id: &TaskId) -> bool {
        self.write(|state| {
            state.deleting.remove(id);
        })
        .is_some()
    }

    /// Stops hiding the record and puts it back where it was.
    ///
    /// The record is not re-inserted when one with the same identifier is
    /// already present or the store is detached. Returns `true` when the
    /// record was re-inserted.
    pub fn restore(&self, removed: RemovedTask) -> bool {
        self.write(|state| {
            state.deleting.remove(&removed.record.id);
            if state
                .records
                .iter()
                .any(|record| record.id == removed.record.id)
            {
                return false;
            }
            let index = removed.index.min(state.records.len());
            state.records.insert(index, removed.record);
            true
        })
        .unwrap_or(false)
    }

    /// Marks the owning view as gone; all later writes are discarded.
    pub fn detach(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .detached = true;
    }

    /// Returns `true` once [`TaskStore::detach`] was called.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.read().detached
    }

    /// Returns a copy of the records in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TaskRecord> {
        self.read().records.clone()
    }

    /// Returns `true` while `id` is hidden by a pending or confirmed
    /// deletion.
    #[must_use]
    pub fn is_hidden(&self, id: &TaskId) -> bool {
        let state = self.read();
        state.deleting.contains(id) || state.deleted.contains(id)
    }

    /// Returns `true` when a record with `id` is shown.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.read().records.iter().any(|record| &record.id == id)
    }

    /// Returns the number of shown records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// Returns `true` when no record is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Returns a counter bumped by every applied write.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Returns render rows with statuses derived against `clock`.
    #[must_use]
    pub fn rows(&self, clock: &impl Clock) -> Vec<TaskRow> {
        self.read()
            .records
            .iter()
            .map(|record| TaskRow {
                record: record.clone(),
                status: record.status(clock),
            })
            .collect()
    }
}
