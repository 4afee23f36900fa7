//! Application services for the metrics view.

mod refresher;

pub use refresher::MetricsRefresher;
