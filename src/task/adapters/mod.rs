//! Adapter implementations of the task ports.
//!
//! - [`http`]: the remote task service over HTTP/JSON
//! - [`memory`]: deterministic service double and notice recorder

pub mod http;
pub mod memory;
