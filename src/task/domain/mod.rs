//! Domain model for the task view.
//!
//! Task records are sourced from the remote service; everything here is pure
//! and free of I/O so status derivation stays deterministic for a given
//! "now".

mod clock;
mod error;
mod form;
mod ids;
mod record;
mod row;
mod status;
mod timestamp;

pub use clock::FixedClock;
pub use error::TaskValidationError;
pub use form::{NewTask, NewTaskForm};
pub use ids::TaskId;
pub use record::TaskRecord;
pub use row::TaskRow;
pub use status::{DerivedStatus, TaskStatus, derive_status};
pub use timestamp::parse_timestamp;
