//! Errors raised while talking to the remote service.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures of a call against the task or metrics service.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service reported that the addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status.
    #[error("service responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response payload did not have the expected shape.
    #[error("unexpected response payload: {0}")]
    DataShape(String),
}

impl ServiceError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Classifies a `reqwest` failure.
    #[must_use]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::transport(err)
        }
    }

    /// Builds an error from a non-success status and its raw body.
    ///
    /// Bodies shaped like `{"error": "...", "detail": "..."}` are folded
    /// into the message; any other non-empty body is used verbatim.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = error_message(status, body);
        if status == 404 {
            Self::NotFound(message)
        } else {
            Self::Status { status, message }
        }
    }

    /// Returns `true` for [`ServiceError::DataShape`].
    #[must_use]
    pub const fn is_data_shape(&self) -> bool {
        matches!(self, Self::DataShape(_))
    }
}

fn error_message(status: u16, body: &[u8]) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) {
        let error = fields.get("error").and_then(Value::as_str);
        let detail = fields.get("detail").and_then(Value::as_str);
        match (error, detail) {
            (Some(error), Some(detail)) => return format!("{error} ({detail})"),
            (Some(error), None) => return error.to_owned(),
            _ => {}
        }
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_owned)
}
