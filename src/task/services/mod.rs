//! Application services for the task view: the store, its refetch and the
//! mutation orchestration.

mod orchestrator;
mod refresh;
mod store;

pub use orchestrator::{DependentViews, MutationError, MutationOrchestrator, MutationResult};
pub use refresh::TaskRefresher;
pub use store::{RemovedTask, TaskStore};
