//! Task lifecycle view for Taskboard.
//!
//! This module derives the display status of each task from its raw
//! timestamps, keeps the ordered task list for the current view, and
//! sequences add, mark-done and delete mutations so the task list and the
//! dependent metrics view both converge on the service's state. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
