//! Scheduling metrics view for Taskboard.
//!
//! The remote service simulates FCFS, LJF and LIFO scheduling over the
//! completed tasks and reports per-task waiting and turnaround times with
//! their aggregates. This module fetches that snapshot, orders it for
//! display and keeps it current when task mutations complete.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The refresher in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
