//! Taskboard: client for a remote scheduled-task service.
//!
//! This crate keeps a local view of scheduled tasks in step with a remote
//! task service, derives the display status of each task from its raw
//! timestamps, and mirrors the scheduling metrics (FCFS, LJF, LIFO) the
//! service computes.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and status derivation with no I/O
//! - **Ports**: Abstract trait interfaces for the remote service and views
//! - **Adapters**: HTTP and in-memory implementations of the ports
//! - **Services**: The task store, refreshers and the mutation orchestrator
//!
//! # Modules
//!
//! - [`client`]: Connection settings and shared HTTP plumbing
//! - [`task`]: Task records, status derivation and mutation orchestration
//! - [`metrics`]: Scheduling metrics snapshot and its refresher
//! - [`view`]: Refresh contracts shared by both views

pub mod client;
pub mod metrics;
pub mod task;
pub mod view;
