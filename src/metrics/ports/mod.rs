//! Port contracts for the metrics view.

pub mod service;

pub use service::MetricsService;
