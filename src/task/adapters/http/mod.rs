//! Task service adapter over HTTP/JSON.
//!
//! Endpoints:
//!
//! - `GET /tasks` → `{ "tasks": [TaskRecord] }` (`null` means no tasks)
//! - `POST /tasks` with `{ name, scheduled_time, duration_sec }` → record
//! - `PATCH /tasks/{id}` → acknowledgement
//! - `DELETE /tasks/{id}` → acknowledgement

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::client::{ApiClient, ServiceError, ServiceResult};
use crate::task::{
    domain::{NewTask, TaskId, TaskRecord},
    ports::TaskService,
};

const TASKS_SEGMENT: &str = "tasks";

/// [`TaskService`] backed by the remote HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    api: ApiClient,
}

impl HttpTaskService {
    /// Creates the adapter over a configured client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self) -> ServiceResult<Vec<TaskRecord>> {
        let url = self.api.endpoint([TASKS_SEGMENT]);
        let body = self.api.send(Method::GET, url, &[], None).await?;
        decode_task_list(body)
    }

    async fn create_task(&self, task: &NewTask) -> ServiceResult<TaskRecord> {
        let payload = serde_json::to_value(task)
            .map_err(|err| ServiceError::DataShape(format!("create payload: {err}")))?;
        let url = self.api.endpoint([TASKS_SEGMENT]);
        let body = self
            .api
            .send(Method::POST, url, &[], Some(&payload))
            .await?;
        serde_json::from_value(body)
            .map_err(|err| ServiceError::DataShape(format!("created task: {err}")))
    }

    async fn mark_done(&self, id: &TaskId) -> ServiceResult<()> {
        let url = self.api.endpoint([TASKS_SEGMENT, id.as_str()]);
        self.api.send(Method::PATCH, url, &[], None).await?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> ServiceResult<()> {
        let url = self.api.endpoint([TASKS_SEGMENT, id.as_str()]);
        self.api.send(Method::DELETE, url, &[], None).await?;
        Ok(())
    }
}

/// Decodes a `{ "tasks": [...] }` payload.
///
/// Entries that do not decode as task records are skipped with a warning so
/// one bad row never hides the rest of the list.
fn decode_task_list(body: Value) -> ServiceResult<Vec<TaskRecord>> {
    let Value::Object(mut fields) = body else {
        return Err(ServiceError::DataShape(
            "task list response is not an object".to_owned(),
        ));
    };
    let entries = match fields.remove("tasks") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) => Vec::new(),
        Some(_) => {
            return Err(ServiceError::DataShape(
                "`tasks` is not an array".to_owned(),
            ));
        }
        None => {
            return Err(ServiceError::DataShape(
                "task list response has no `tasks` field".to_owned(),
            ));
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<TaskRecord>(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed task record");
                None
            }
        })
        .collect())
}
