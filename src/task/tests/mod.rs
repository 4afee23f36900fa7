//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain derivation and validation, the
//! store, and the orchestration services driven through the in-memory
//! service.
