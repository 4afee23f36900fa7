//! Domain model for scheduling metrics.
//!
//! The service computes the metrics; this module only decodes them
//! leniently, orders them for display and shapes them for rendering.

mod algorithm;
mod result;
mod snapshot;

pub use algorithm::Algorithm;
pub use result::{AlgorithmResult, AlgorithmSummary, ChartSeries, TaskMetric};
pub use snapshot::MetricsSnapshot;
