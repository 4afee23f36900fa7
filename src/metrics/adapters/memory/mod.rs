//! In-memory metrics service serving canned results.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::client::ServiceResult;
use crate::metrics::{
    domain::{Algorithm, AlgorithmResult},
    ports::MetricsService,
};
use crate::task::adapters::memory::{ServiceCall, ServiceControls};

/// Thread-safe stand-in for the remote metrics endpoint.
///
/// Serves whatever results were last published. Calls are recorded as
/// [`ServiceCall::FetchMetrics`] in the shared [`ServiceControls`], so a
/// task service and a metrics service built on the same controls share one
/// ordered call log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricsService {
    results: Arc<RwLock<Vec<AlgorithmResult>>>,
    controls: ServiceControls,
}

impl InMemoryMetricsService {
    /// Creates a service with no results and its own controls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with no results driven by shared controls.
    #[must_use]
    pub fn with_controls(controls: ServiceControls) -> Self {
        Self {
            results: Arc::default(),
            controls,
        }
    }

    /// Returns the controls this service obeys.
    #[must_use]
    pub const fn controls(&self) -> &ServiceControls {
        &self.controls
    }

    /// Replaces the results served from now on.
    pub fn publish(&self, results: Vec<AlgorithmResult>) {
        *self.results.write().unwrap_or_else(PoisonError::into_inner) = results;
    }

    fn published(&self) -> Vec<AlgorithmResult> {
        self.results
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MetricsService for InMemoryMetricsService {
    async fn fetch_all(&self) -> ServiceResult<Vec<AlgorithmResult>> {
        self.controls
            .enter(ServiceCall::FetchMetrics("all".to_owned()))
            .await?;
        Ok(self.published())
    }

    async fn fetch_algorithm(&self, algo: &Algorithm) -> ServiceResult<AlgorithmResult> {
        self.controls
            .enter(ServiceCall::FetchMetrics(algo.as_str().to_owned()))
            .await?;
        Ok(self
            .published()
            .into_iter()
            .find(|result| &result.algo == algo)
            .unwrap_or_else(|| AlgorithmResult::empty(algo.clone())))
    }
}
