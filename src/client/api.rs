//! Shared HTTP client for the task and metrics endpoints.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use super::{ConfigError, ServiceConfig, ServiceError, ServiceResult};

/// Configured [`reqwest::Client`] bound to the service base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    metrics_segments: Vec<String>,
}

impl ApiClient {
    /// Builds a client from validated configuration.
    ///
    /// The client sends and accepts JSON and applies the configured timeout
    /// to every request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_url = config.base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;

        Ok(Self {
            http,
            base_url,
            metrics_segments: config.metrics_segments(),
        })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the metrics endpoint path segments.
    #[must_use]
    pub fn metrics_segments(&self) -> &[String] {
        &self.metrics_segments
    }

    /// Resolves path segments against the base URL.
    ///
    /// Segments are percent-encoded, so opaque task identifiers are safe to
    /// pass through unchanged.
    #[must_use]
    pub fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// An empty success body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Timeout`] or [`ServiceError::Transport`] when
    /// the exchange fails, [`ServiceError::NotFound`] or
    /// [`ServiceError::Status`] for non-success statuses, and
    /// [`ServiceError::DataShape`] when the body is not JSON.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> ServiceResult<Value> {
        let mut request = self.http.request(method.clone(), url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(%method, %url, error = %err, "service request failed");
            ServiceError::from_reqwest(err)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ServiceError::from_reqwest)?;

        if !status.is_success() {
            let err = ServiceError::from_response(status.as_u16(), &bytes);
            tracing::error!(%method, %url, error = %err, "service returned an error status");
            return Err(err);
        }

        tracing::debug!(%method, %url, status = status.as_u16(), "service request succeeded");
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| ServiceError::DataShape(format!("{method} {url}: {err}")))
    }
}
