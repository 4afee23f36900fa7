//! User-visible failure notices.

use std::fmt;

/// The mutation a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Task creation.
    Add,
    /// Marking a task done.
    MarkDone,
    /// Task deletion.
    Delete,
}

impl MutationKind {
    /// Returns the canonical name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::MarkDone => "mark_done",
            Self::Delete => "delete",
        }
    }

    /// Returns the headline shown when the mutation fails.
    #[must_use]
    pub const fn failure_headline(self) -> &'static str {
        match self {
            Self::Add => "Failed to add task.",
            Self::MarkDone => "Failed to mark as done.",
            Self::Delete => "Failed to delete.",
        }
    }
}

/// A non-blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Mutation that failed.
    pub kind: MutationKind,
    /// Failure detail.
    pub detail: String,
}

impl Notice {
    /// Creates a failure notice for `kind`.
    #[must_use]
    pub fn failure(kind: MutationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.failure_headline(), self.detail)
    }
}

/// Destination for user-visible notices.
pub trait NoticeSink: Send + Sync {
    /// Shows one notice.
    fn notify(&self, notice: Notice);
}
