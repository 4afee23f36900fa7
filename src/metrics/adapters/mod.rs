//! Adapter implementations of the metrics ports.

pub mod http;
pub mod memory;
