//! Port contracts for the task view.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! the remote task service, change listeners and the user-visible notice
//! channel.

pub mod notice;
pub mod refresh;
pub mod service;

pub use notice::{MutationKind, Notice, NoticeSink};
pub use refresh::TaskChangeListener;
pub use service::TaskService;
