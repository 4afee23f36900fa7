//! Remote task service port.

use async_trait::async_trait;

use crate::client::ServiceResult;
use crate::task::domain::{NewTask, TaskId, TaskRecord};

/// Task endpoints of the remote service.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Lists every task in service order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::client::ServiceError::DataShape`] when the payload
    /// does not contain a task list, or another variant when the call fails.
    async fn list_tasks(&self) -> ServiceResult<Vec<TaskRecord>>;

    /// Creates a task and returns the record with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::client::ServiceError`] when the service rejects the
    /// task or the call fails.
    async fn create_task(&self, task: &NewTask) -> ServiceResult<TaskRecord>;

    /// Marks a task as done.
    ///
    /// # Errors
    ///
    /// Returns [`crate::client::ServiceError::NotFound`] when the task does
    /// not exist, or another variant when the call fails.
    async fn mark_done(&self, id: &TaskId) -> ServiceResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::client::ServiceError::NotFound`] when the task does
    /// not exist, or another variant when the call fails.
    async fn delete_task(&self, id: &TaskId) -> ServiceResult<()>;
}
