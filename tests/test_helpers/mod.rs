//! Shared wiring for integration tests: the whole task board running over
//! the in-memory services, with one call log across both services.

use std::sync::Arc;
use std::time::Duration;

use taskboard::metrics::{
    adapters::memory::InMemoryMetricsService,
    domain::{Algorithm, AlgorithmResult},
    services::MetricsRefresher,
};
use taskboard::task::{
    adapters::memory::{InMemoryTaskService, RecordingNotices, ServiceControls, ServiceOperation},
    domain::TaskRecord,
    services::{DependentViews, MutationOrchestrator, TaskRefresher, TaskStore},
};

/// Task board wired the way the binary wires it, minus HTTP.
pub struct TestBoard {
    pub controls: ServiceControls,
    pub task_service: Arc<InMemoryTaskService>,
    pub metrics_service: Arc<InMemoryMetricsService>,
    pub store: TaskStore,
    pub task_view: TaskRefresher<InMemoryTaskService>,
    pub metrics_view: MetricsRefresher<InMemoryMetricsService>,
    pub notices: RecordingNotices,
    pub orchestrator: MutationOrchestrator<InMemoryTaskService>,
}

impl TestBoard {
    /// Creates an empty board whose metrics endpoint serves [`sample_results`].
    pub fn new() -> Self {
        let controls = ServiceControls::new();
        let task_service = Arc::new(InMemoryTaskService::with_controls(controls.clone()));
        let metrics_service = Arc::new(InMemoryMetricsService::with_controls(controls.clone()));
        metrics_service.publish(sample_results());

        let store = TaskStore::new();
        let task_view = TaskRefresher::new(Arc::clone(&task_service), store.clone());
        let metrics_view = MetricsRefresher::new(Arc::clone(&metrics_service));
        let notices = RecordingNotices::new();
        let orchestrator = MutationOrchestrator::new(
            Arc::clone(&task_service),
            store.clone(),
            DependentViews::new(Arc::new(task_view.clone()), Arc::new(metrics_view.clone())),
            Arc::new(notices.clone()),
        );

        Self {
            controls,
            task_service,
            metrics_service,
            store,
            task_view,
            metrics_view,
            notices,
            orchestrator,
        }
    }

    /// Seeds the service and shows the seeded list, without logging calls.
    pub fn seed(&self, records: Vec<TaskRecord>) -> eyre::Result<()> {
        for record in records {
            self.task_service
                .seed(record)
                .map_err(|err| eyre::eyre!("seed task: {err}"))?;
        }
        let tasks = self
            .task_service
            .tasks()
            .map_err(|err| eyre::eyre!("read seeded tasks: {err}"))?;
        self.store.replace_all(tasks);
        Ok(())
    }

    /// Returns the identifiers currently shown, in display order.
    pub fn ids(&self) -> Vec<String> {
        self.store
            .snapshot()
            .into_iter()
            .map(|record| record.id.to_string())
            .collect()
    }

    /// Returns how many calls of `operation` were initiated.
    pub fn count(&self, operation: ServiceOperation) -> usize {
        self.controls.calls().count(operation)
    }

    /// Returns the initiated refetches, in order.
    pub fn refetches(&self) -> Vec<ServiceOperation> {
        self.controls
            .calls()
            .operations()
            .into_iter()
            .filter(|operation| {
                matches!(
                    operation,
                    ServiceOperation::ListTasks | ServiceOperation::FetchMetrics
                )
            })
            .collect()
    }
}

impl Default for TestBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Results the in-memory metrics endpoint serves, deliberately out of
/// display order.
pub fn sample_results() -> Vec<AlgorithmResult> {
    vec![
        AlgorithmResult::empty(Algorithm::Lifo)
            .with_metric(2_u64, 0.0, 60.0)
            .with_metric(1_u64, 60.0, 90.0)
            .with_aggregates(30.0, 75.0, 0.02),
        AlgorithmResult::empty(Algorithm::Fcfs)
            .with_metric(1_u64, 0.0, 30.0)
            .with_metric(2_u64, 30.0, 90.0)
            .with_aggregates(15.0, 60.0, 0.02),
        AlgorithmResult::empty(Algorithm::Ljf)
            .with_metric(2_u64, 0.0, 60.0)
            .with_metric(1_u64, 60.0, 90.0)
            .with_aggregates(30.0, 75.0, 0.02),
    ]
}

/// Polls `condition` until it holds, failing after five seconds.
pub async fn wait_for(mut condition: impl FnMut() -> bool) -> eyre::Result<()> {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .map_err(|_| eyre::eyre!("condition did not hold within five seconds"))
}
