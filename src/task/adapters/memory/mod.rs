//! In-memory adapters for tests and local demos.
//!
//! The service doubles share [`ServiceControls`]: one call log plus holds,
//! delays and injected failures per operation. The metrics double reuses
//! the same controls so both halves of the simulated backend log into one
//! ordered record.

mod calls;
mod controls;
mod notice;
mod task;

pub use calls::{CallLog, ServiceCall, ServiceOperation};
pub use controls::ServiceControls;
pub use notice::RecordingNotices;
pub use task::InMemoryTaskService;
