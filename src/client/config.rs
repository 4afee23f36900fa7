//! Service client configuration.
//!
//! [`ServiceConfig`] is layered from defaults, an optional TOML file and
//! environment overrides. Command-line flags are applied last by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Path of the metrics endpoint used when nothing else is configured.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Environment variable overriding [`ServiceConfig::base_url`].
pub const BASE_URL_ENV: &str = "TASKBOARD_BASE_URL";

/// Environment variable overriding [`ServiceConfig::timeout_ms`].
pub const TIMEOUT_MS_ENV: &str = "TASKBOARD_TIMEOUT_MS";

/// Environment variable overriding [`ServiceConfig::metrics_path`].
pub const METRICS_PATH_ENV: &str = "TASKBOARD_METRICS_PATH";

/// Settings for reaching the remote task and metrics service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the service, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Path of the metrics endpoint relative to the base URL.
    pub metrics_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            metrics_path: DEFAULT_METRICS_PATH.to_owned(),
        }
    }
}

impl ServiceConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML or
    /// contains unknown keys.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] when the timeout variable is
    /// not an integer.
    pub fn with_process_env(self) -> Result<Self, ConfigError> {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] when the timeout variable is
    /// not an integer.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = non_empty(BASE_URL_ENV) {
            self.base_url = base_url.trim().to_owned();
        }
        if let Some(timeout) = non_empty(TIMEOUT_MS_ENV) {
            self.timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
        }
        if let Some(metrics_path) = non_empty(METRICS_PATH_ENV) {
            self.metrics_path = metrics_path.trim().to_owned();
        }
        Ok(self)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses and checks the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the value is not an
    /// absolute `http` or `https` URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            value: self.base_url.clone(),
            reason: reason.to_owned(),
        };
        let url = Url::parse(self.base_url.trim()).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base"));
        }
        Ok(url)
    }

    /// Returns the metrics path split into non-empty segments.
    #[must_use]
    pub fn metrics_segments(&self) -> Vec<String> {
        self.metrics_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Checks the configuration as a whole.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: an invalid base URL, a zero
    /// timeout, or an empty metrics path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.metrics_segments().is_empty() {
            return Err(ConfigError::InvalidMetricsPath(self.metrics_path.clone()));
        }
        Ok(())
    }
}

/// Errors raised while assembling the service client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL could not be used.
    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The timeout override was not an integer.
    #[error("invalid timeout '{0}', expected milliseconds as an integer")]
    InvalidTimeout(String),

    /// The timeout was zero.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    /// The metrics path had no segments.
    #[error("invalid metrics path '{0}'")]
    InvalidMetricsPath(String),

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
