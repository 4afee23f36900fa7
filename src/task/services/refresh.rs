//! Authoritative task list refetch.

use async_trait::async_trait;
use std::sync::Arc;

use super::TaskStore;
use crate::task::ports::TaskService;
use crate::view::{RefreshOutcome, ViewRefresh};

/// The "refresh task view" callback: re-reads the task list and replaces the
/// store's contents with it.
#[derive(Clone)]
pub struct TaskRefresher<S>
where
    S: TaskService,
{
    service: Arc<S>,
    store: TaskStore,
}

impl<S> TaskRefresher<S>
where
    S: TaskService,
{
    /// Creates a refresher writing into `store`.
    #[must_use]
    pub const fn new(service: Arc<S>, store: TaskStore) -> Self {
        Self { service, store }
    }

    /// Returns the store this refresher writes into.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Fetches the task list and applies it with
    /// [`TaskStore::replace_all`].
    ///
    /// A failed fetch, including an unexpected payload shape, leaves the
    /// store as it was. A response arriving after the store detached is
    /// dropped.
    pub async fn refresh_tasks(&self) -> RefreshOutcome {
        match self.service.list_tasks().await {
            Ok(records) => {
                let count = records.len();
                if self.store.replace_all(records) {
                    tracing::debug!(count, "task list refreshed");
                    RefreshOutcome::Applied
                } else {
                    tracing::debug!("task view detached; dropping task list");
                    RefreshOutcome::Discarded
                }
            }
            Err(err) if self.store.is_detached() => {
                tracing::debug!(error = %err, "task view detached; ignoring failed refresh");
                RefreshOutcome::Discarded
            }
            Err(err) if err.is_data_shape() => {
                tracing::warn!(error = %err, "unexpected task list payload; keeping current list");
                RefreshOutcome::Failed(err)
            }
            Err(err) => {
                tracing::error!(error = %err, "task list refresh failed");
                RefreshOutcome::Failed(err)
            }
        }
    }
}

#[async_trait]
impl<S> ViewRefresh for TaskRefresher<S>
where
    S: TaskService,
{
    async fn refresh(&self) {
        self.refresh_tasks().await;
    }
}
