//! The complete metrics result set shown by the metrics view.

use super::{Algorithm, AlgorithmResult, AlgorithmSummary, ChartSeries};

/// All algorithm results from one fetch, in display order.
///
/// Built only through [`MetricsSnapshot::from_results`], which sorts known
/// algorithms into `fcfs`, `ljf`, `lifo` order and keeps any other keys
/// last in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    results: Vec<AlgorithmResult>,
}

impl MetricsSnapshot {
    /// Creates a snapshot with no results.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Creates a snapshot from fetched results.
    #[must_use]
    pub fn from_results(mut results: Vec<AlgorithmResult>) -> Self {
        results.sort_by_key(|result| result.algo.display_rank());
        Self { results }
    }

    /// Returns the results in display order.
    #[must_use]
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Returns the first result for `algo`.
    #[must_use]
    pub fn get(&self, algo: &Algorithm) -> Option<&AlgorithmResult> {
        self.results.iter().find(|result| &result.algo == algo)
    }

    /// Returns the number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` when the snapshot holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the aggregate line of every result, in display order.
    #[must_use]
    pub fn summaries(&self) -> Vec<AlgorithmSummary> {
        self.results.iter().map(AlgorithmResult::summary).collect()
    }

    /// Returns the chart series for `algo`; empty when the algorithm is
    /// missing from the snapshot.
    #[must_use]
    pub fn chart(&self, algo: &Algorithm) -> ChartSeries {
        self.get(algo).map(AlgorithmResult::chart).unwrap_or_default()
    }
}
