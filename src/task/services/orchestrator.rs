//! Sequencing of task mutations and the refreshes that follow them.

use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use super::TaskStore;
use crate::client::ServiceError;
use crate::task::{
    domain::{NewTaskForm, TaskId, TaskRecord, TaskValidationError},
    ports::{MutationKind, Notice, NoticeSink, TaskChangeListener, TaskService},
};
use crate::view::ViewRefresh;

/// Errors returned by mutation operations.
#[derive(Debug, Clone, Error)]
pub enum MutationError {
    /// The form input was rejected before any service call.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The service call failed; a notice has been shown.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Refresh callbacks of the two views that depend on task mutations.
#[derive(Clone)]
pub struct DependentViews {
    tasks: Arc<dyn ViewRefresh>,
    metrics: Arc<dyn ViewRefresh>,
}

impl DependentViews {
    /// Bundles the task view and metrics view refresh callbacks.
    #[must_use]
    pub fn new(tasks: Arc<dyn ViewRefresh>, metrics: Arc<dyn ViewRefresh>) -> Self {
        Self { tasks, metrics }
    }
}

/// Runs add, mark-done and delete against the task service and keeps the
/// task and metrics views in step with the outcome.
///
/// After every successful mutation the task view is refreshed first and the
/// metrics view second. Every service failure produces exactly one notice.
#[derive(Clone)]
pub struct MutationOrchestrator<S>
where
    S: TaskService,
{
    service: Arc<S>,
    store: TaskStore,
    views: DependentViews,
    notices: Arc<dyn NoticeSink>,
    listeners: Vec<Arc<dyn TaskChangeListener>>,
}

impl<S> MutationOrchestrator<S>
where
    S: TaskService,
{
    /// Creates an orchestrator with no change listeners.
    #[must_use]
    pub fn new(
        service: Arc<S>,
        store: TaskStore,
        views: DependentViews,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            service,
            store,
            views,
            notices,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener fired after every successful mutation.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn TaskChangeListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Returns the store the orchestrator updates.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Validates `form` and creates the task.
    ///
    /// On success the created record is prepended to the store before the
    /// task and metrics views are refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Validation`] without contacting the service
    /// when the form is invalid, or [`MutationError::Service`] when creation
    /// fails. A failed creation leaves the store untouched.
    pub async fn add(&self, form: &NewTaskForm) -> MutationResult<TaskRecord> {
        let task = form.validate().inspect_err(|err| {
            tracing::debug!(error = %err, "rejected new task input");
        })?;

        let span = mutation_span(MutationKind::Add);
        async {
            let created = self
                .service
                .create_task(&task)
                .await
                .map_err(|err| self.failed(MutationKind::Add, err))?;
            tracing::Span::current().record("task_id", created.id.as_str());
            tracing::info!(name = %created.name, "task created");

            self.store.insert_optimistic(created.clone());
            self.refresh_views().await;
            self.announce(Some(&created));
            Ok::<_, MutationError>(created)
        }
        .instrument(span)
        .await
    }

    /// Marks the task done on the service.
    ///
    /// Nothing changes locally until the refreshed list reports completion.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Service`] when the call fails.
    pub async fn mark_done(&self, id: &TaskId) -> MutationResult<()> {
        let span = mutation_span(MutationKind::MarkDone);
        span.record("task_id", id.as_str());
        async {
            self.service
                .mark_done(id)
                .await
                .map_err(|err| self.failed(MutationKind::MarkDone, err))?;
            tracing::info!("task marked done");

            self.refresh_views().await;
            self.announce(None);
            Ok::<_, MutationError>(())
        }
        .instrument(span)
        .await
    }

    /// Deletes the task, removing it from the store before the call.
    ///
    /// The task stays hidden through the whole round trip, including when
    /// another mutation's refetch lands while this call is pending.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Service`] when the call fails; the removed
    /// record is put back first.
    pub async fn delete(&self, id: &TaskId) -> MutationResult<()> {
        let span = mutation_span(MutationKind::Delete);
        span.record("task_id", id.as_str());
        async {
            let removed = self.store.remove_local(id);
            if let Err(err) = self.service.delete_task(id).await {
                let restored = removed.map_or_else(
                    || self.store.cancel_removal(id),
                    |record| self.store.restore(record),
                );
                tracing::debug!(restored, "delete rolled back");
                return Err(self.failed(MutationKind::Delete, err));
            }
            self.store.confirm_removed(id);
            tracing::info!("task deleted");

            self.refresh_views().await;
            self.announce(None);
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Loads both views for the first time; neither refresh waits for the
    /// other.
    pub async fn initial_load(&self) {
        tokio::join!(self.views.tasks.refresh(), self.views.metrics.refresh());
    }

    async fn refresh_views(&self) {
        self.views.tasks.refresh().await;
        self.views.metrics.refresh().await;
    }

    fn announce(&self, created: Option<&TaskRecord>) {
        for listener in &self.listeners {
            listener.on_task_change(created);
        }
    }

    fn failed(&self, kind: MutationKind, err: ServiceError) -> MutationError {
        tracing::error!(error = %err, "{}", kind.failure_headline());
        self.notices.notify(Notice::failure(kind, err.to_string()));
        MutationError::Service(err)
    }
}

fn mutation_span(kind: MutationKind) -> tracing::Span {
    tracing::info_span!(
        "mutation",
        mutation_id = %Uuid::new_v4(),
        operation = kind.as_str(),
        task_id = tracing::field::Empty,
    )
}
