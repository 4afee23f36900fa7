//! Shared record of calls issued against the service doubles.
//!
//! The in-memory task and metrics services append to one [`CallLog`] so
//! tests can assert the relative order in which refreshes were initiated.

use std::sync::{Arc, Mutex, PoisonError};

use crate::task::domain::TaskId;

/// Kind of call against the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOperation {
    /// `GET /tasks`.
    ListTasks,
    /// `POST /tasks`.
    CreateTask,
    /// `PATCH /tasks/{id}`.
    MarkDone,
    /// `DELETE /tasks/{id}`.
    DeleteTask,
    /// `GET /metrics`.
    FetchMetrics,
}

/// One call as it was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// Task list fetch.
    ListTasks,
    /// Task creation, carrying the submitted name.
    CreateTask(String),
    /// Mark-done request.
    MarkDone(TaskId),
    /// Deletion request.
    DeleteTask(TaskId),
    /// Metrics fetch, carrying the requested algorithm key.
    FetchMetrics(String),
}

impl ServiceCall {
    /// Returns the operation this call belongs to.
    #[must_use]
    pub const fn operation(&self) -> ServiceOperation {
        match self {
            Self::ListTasks => ServiceOperation::ListTasks,
            Self::CreateTask(_) => ServiceOperation::CreateTask,
            Self::MarkDone(_) => ServiceOperation::MarkDone,
            Self::DeleteTask(_) => ServiceOperation::DeleteTask,
            Self::FetchMetrics(_) => ServiceOperation::FetchMetrics,
        }
    }
}

/// Append-only, thread-safe log of initiated calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<ServiceCall>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    pub fn record(&self, call: ServiceCall) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Returns all calls in initiation order.
    #[must_use]
    pub fn entries(&self) -> Vec<ServiceCall> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Counts the calls of one operation.
    #[must_use]
    pub fn count(&self, operation: ServiceOperation) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Returns the operations in initiation order.
    #[must_use]
    pub fn operations(&self) -> Vec<ServiceOperation> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(ServiceCall::operation)
            .collect()
    }

    /// Forgets all recorded calls.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
