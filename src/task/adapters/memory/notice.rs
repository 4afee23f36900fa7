//! Notice sink that keeps every notice for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

use crate::task::ports::{Notice, NoticeSink};

/// Thread-safe recorder of shown notices.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotices {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotices {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notices shown so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many notices were shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when no notice was shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
