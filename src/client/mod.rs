//! Connection settings and shared HTTP plumbing for the task service.
//!
//! The remote service exposes both the task endpoints and the metrics
//! endpoint, so the task and metrics adapters share one [`ApiClient`] built
//! from an explicitly constructed [`ServiceConfig`].

mod api;
mod config;
mod error;

pub use api::ApiClient;
pub use config::{
    BASE_URL_ENV, ConfigError, DEFAULT_BASE_URL, DEFAULT_METRICS_PATH, DEFAULT_TIMEOUT_MS,
    METRICS_PATH_ENV, ServiceConfig, TIMEOUT_MS_ENV,
};
pub use error::{ServiceError, ServiceResult};
