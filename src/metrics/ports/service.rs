//! Remote metrics service port.

use async_trait::async_trait;

use crate::client::ServiceResult;
use crate::metrics::domain::{Algorithm, AlgorithmResult};

/// Read access to the metrics the service computes.
#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Fetches the results of every algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`crate::client::ServiceError::DataShape`] when the payload
    /// has no result list, or another service error when the call fails.
    async fn fetch_all(&self) -> ServiceResult<Vec<AlgorithmResult>>;

    /// Fetches the result of a single algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`crate::client::ServiceError::DataShape`] when the payload
    /// is not a result object, or another service error when the call fails.
    async fn fetch_algorithm(&self, algo: &Algorithm) -> ServiceResult<AlgorithmResult>;
}
