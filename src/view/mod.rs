//! Refresh contracts shared by the task and metrics views.
//!
//! The mutation orchestrator refreshes both views after every successful
//! mutation without knowing how either view loads its data; each view owns
//! a [`ViewRefresh`] implementation and reports a [`RefreshOutcome`].

use async_trait::async_trait;

use crate::client::ServiceError;

/// What happened to one refresh attempt.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The fetched data replaced the view's state.
    Applied,
    /// The view was detached before the response arrived; nothing changed.
    Discarded,
    /// The fetch failed; the view kept or cleared its state as documented
    /// by the refresher.
    Failed(ServiceError),
}

impl RefreshOutcome {
    /// Returns `true` for [`RefreshOutcome::Applied`].
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Re-reads one view's data from the service.
///
/// Supplied to the mutation orchestrator by whichever component owns the
/// view. Implementations log their own failures; a refresh never fails the
/// caller.
#[async_trait]
pub trait ViewRefresh: Send + Sync {
    /// Fetches and applies the view's data.
    async fn refresh(&self);
}
