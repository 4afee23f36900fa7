//! Metrics service adapter over HTTP/JSON.
//!
//! `GET {metrics_path}?algo=all` answers `{ "results": [AlgorithmResult] }`;
//! any single algorithm key answers one result object.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::client::{ApiClient, ServiceError, ServiceResult};
use crate::metrics::{
    domain::{Algorithm, AlgorithmResult},
    ports::MetricsService,
};

const ALL_ALGORITHMS: &str = "all";

/// [`MetricsService`] backed by the remote HTTP API.
#[derive(Debug, Clone)]
pub struct HttpMetricsService {
    api: ApiClient,
}

impl HttpMetricsService {
    /// Creates the adapter over a configured client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn query(&self, algo: &str) -> ServiceResult<Value> {
        let url = self.api.endpoint(self.api.metrics_segments());
        self.api
            .send(Method::GET, url, &[("algo", algo)], None)
            .await
    }
}

#[async_trait]
impl MetricsService for HttpMetricsService {
    async fn fetch_all(&self) -> ServiceResult<Vec<AlgorithmResult>> {
        let body = self.query(ALL_ALGORITHMS).await?;
        decode_results(body)
    }

    async fn fetch_algorithm(&self, algo: &Algorithm) -> ServiceResult<AlgorithmResult> {
        let body = self.query(algo.as_str()).await?;
        serde_json::from_value(body)
            .map_err(|err| ServiceError::DataShape(format!("{algo} metrics: {err}")))
    }
}

/// Decodes a `{ "results": [...] }` payload.
///
/// `null` results mean no data yet. Entries that do not decode are skipped
/// with a warning.
fn decode_results(body: Value) -> ServiceResult<Vec<AlgorithmResult>> {
    let Value::Object(mut fields) = body else {
        return Err(ServiceError::DataShape(
            "metrics response is not an object".to_owned(),
        ));
    };
    let entries = match fields.remove("results") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) => return Ok(Vec::new()),
        Some(_) => {
            return Err(ServiceError::DataShape(
                "`results` is not an array".to_owned(),
            ));
        }
        None => {
            return Err(ServiceError::DataShape(
                "metrics response has no `results` field".to_owned(),
            ));
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(
            |entry| match serde_json::from_value::<AlgorithmResult>(entry) {
                Ok(result) => Some(result),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed metrics result");
                    None
                }
            },
        )
        .collect())
}
