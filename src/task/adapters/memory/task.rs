//! In-memory task service for orchestration tests and local demos.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{ServiceCall, ServiceControls};
use crate::client::{ServiceError, ServiceResult};
use crate::task::{
    domain::{NewTask, TaskId, TaskRecord, parse_timestamp},
    ports::TaskService,
};

/// Duration the service assigns when none (or zero) is submitted.
const DEFAULT_DURATION_SEC: u64 = 2;

/// Thread-safe in-memory stand-in for the remote task service.
///
/// Behaves like the real backend: identifiers are assigned sequentially,
/// scheduled times are normalised to `YYYY-MM-DD HH:MM`, and unknown
/// identifiers answer "not found". Holds, delays and failures are driven
/// through the shared [`ServiceControls`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskService {
    state: Arc<RwLock<InMemoryTaskState>>,
    controls: ServiceControls,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<TaskRecord>,
    last_id: u64,
}

fn lock_error(err: impl ToString) -> ServiceError {
    ServiceError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskService {
    /// Creates an empty service with its own controls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty service driven by shared controls.
    #[must_use]
    pub fn with_controls(controls: ServiceControls) -> Self {
        Self {
            state: Arc::default(),
            controls,
        }
    }

    /// Returns the controls this service obeys.
    #[must_use]
    pub const fn controls(&self) -> &ServiceControls {
        &self.controls
    }

    /// Adds a record directly, bypassing controls and the call log.
    ///
    /// Numeric identifiers advance the sequence used for created tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Transport`] when the state lock is poisoned.
    pub fn seed(&self, record: TaskRecord) -> ServiceResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Ok(numeric) = record.id.as_str().parse::<u64>() {
            state.last_id = state.last_id.max(numeric);
        }
        state.tasks.push(record);
        Ok(())
    }

    /// Returns the service-side records.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Transport`] when the state lock is poisoned.
    pub fn tasks(&self) -> ServiceResult<Vec<TaskRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.clone())
    }

    /// Records that execution of a task began, as the backend scheduler does.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for unknown identifiers.
    pub fn start_task(&self, id: &TaskId, at: &str) -> ServiceResult<()> {
        self.update(id, |record| record.start_time = Some(at.to_owned()))
    }

    /// Records that execution of a task finished.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for unknown identifiers.
    pub fn finish_task(&self, id: &TaskId, at: &str) -> ServiceResult<()> {
        self.update(id, |record| record.end_time = Some(at.to_owned()))
    }

    fn update(&self, id: &TaskId, apply: impl FnOnce(&mut TaskRecord)) -> ServiceResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let record = state
            .tasks
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_owned()))?;
        apply(record);
        Ok(())
    }
}

#[async_trait]
impl TaskService for InMemoryTaskService {
    async fn list_tasks(&self) -> ServiceResult<Vec<TaskRecord>> {
        self.controls.enter(ServiceCall::ListTasks).await?;
        self.tasks()
    }

    async fn create_task(&self, task: &NewTask) -> ServiceResult<TaskRecord> {
        self.controls
            .enter(ServiceCall::CreateTask(task.name.clone()))
            .await?;

        let scheduled_at = parse_timestamp(&task.scheduled_time).ok_or_else(|| {
            ServiceError::Status {
                status: 400,
                message: "Invalid task time format".to_owned(),
            }
        })?;
        let duration_sec = if task.duration_sec == 0 {
            DEFAULT_DURATION_SEC
        } else {
            task.duration_sec
        };

        let mut state = self.state.write().map_err(lock_error)?;
        state.last_id += 1;
        let record = TaskRecord::new(
            state.last_id,
            task.name.clone(),
            scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
        )
        .with_duration(duration_sec);
        state.tasks.push(record.clone());
        Ok(record)
    }

    async fn mark_done(&self, id: &TaskId) -> ServiceResult<()> {
        self.controls.enter(ServiceCall::MarkDone(id.clone())).await?;
        self.update(id, |record| record.done = true)
    }

    async fn delete_task(&self, id: &TaskId) -> ServiceResult<()> {
        self.controls
            .enter(ServiceCall::DeleteTask(id.clone()))
            .await?;
        let mut state = self.state.write().map_err(lock_error)?;
        let position = state
            .tasks
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_owned()))?;
        state.tasks.remove(position);
        Ok(())
    }
}
