//! Fetching and caching of the metrics snapshot.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::client::ServiceError;
use crate::metrics::{
    domain::{Algorithm, AlgorithmResult, AlgorithmSummary, ChartSeries, MetricsSnapshot},
    ports::MetricsService,
};
use crate::view::{RefreshOutcome, ViewRefresh};

/// The "refresh metrics view" callback and the snapshot it maintains.
///
/// Each successful fetch replaces the snapshot wholesale. A payload with an
/// unexpected shape clears it; any other failure keeps the previous
/// snapshot on display. Failures are logged and never propagate.
#[derive(Clone)]
pub struct MetricsRefresher<S>
where
    S: MetricsService,
{
    service: Arc<S>,
    state: Arc<RwLock<MetricsState>>,
}

#[derive(Debug, Default)]
struct MetricsState {
    snapshot: MetricsSnapshot,
    detached: bool,
    revision: u64,
}

impl<S> MetricsRefresher<S>
where
    S: MetricsService,
{
    /// Creates a refresher with an empty snapshot.
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            state: Arc::default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MetricsState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the snapshot unless the view detached.
    fn apply(&self, snapshot: MetricsSnapshot) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.detached {
            return false;
        }
        state.snapshot = snapshot;
        state.revision += 1;
        true
    }

    /// Fetches every algorithm's results and replaces the snapshot.
    pub async fn fetch_metrics(&self) -> RefreshOutcome {
        match self.service.fetch_all().await {
            Ok(results) => {
                let snapshot = MetricsSnapshot::from_results(results);
                let count = snapshot.len();
                if self.apply(snapshot) {
                    tracing::debug!(count, "metrics refreshed");
                    RefreshOutcome::Applied
                } else {
                    tracing::debug!("metrics view detached; dropping metrics");
                    RefreshOutcome::Discarded
                }
            }
            Err(err) => self.failed(err),
        }
    }

    fn failed(&self, err: ServiceError) -> RefreshOutcome {
        if self.is_detached() {
            tracing::debug!(error = %err, "metrics view detached; ignoring failed refresh");
            return RefreshOutcome::Discarded;
        }
        if err.is_data_shape() {
            tracing::warn!(error = %err, "unexpected metrics payload; showing no metrics");
            self.apply(MetricsSnapshot::empty());
        } else {
            tracing::error!(error = %err, "failed to fetch metrics");
        }
        RefreshOutcome::Failed(err)
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.read().snapshot.clone()
    }

    /// Returns the current result for `algo`.
    #[must_use]
    pub fn result(&self, algo: &Algorithm) -> Option<AlgorithmResult> {
        self.read().snapshot.get(algo).cloned()
    }

    /// Returns the aggregate lines in display order.
    #[must_use]
    pub fn summaries(&self) -> Vec<AlgorithmSummary> {
        self.read().snapshot.summaries()
    }

    /// Returns the chart series for `algo`.
    #[must_use]
    pub fn chart(&self, algo: &Algorithm) -> ChartSeries {
        self.read().snapshot.chart(algo)
    }

    /// Marks the owning view as gone; later responses are discarded.
    pub fn detach(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .detached = true;
    }

    /// Returns `true` once [`MetricsRefresher::detach`] was called.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.read().detached
    }

    /// Returns a counter bumped by every applied snapshot.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.read().revision
    }
}

#[async_trait]
impl<S> ViewRefresh for MetricsRefresher<S>
where
    S: MetricsService,
{
    async fn refresh(&self) {
        self.fetch_metrics().await;
    }
}
