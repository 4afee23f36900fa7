//! Clock pinned to one instant.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

/// A [`Clock`] that always reports the same local instant.
///
/// Used to render the task list as of a chosen time and to freeze "now" in
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    /// Creates a clock reporting `now`.
    #[must_use]
    pub const fn new(now: DateTime<Local>) -> Self {
        Self { now }
    }

    /// Creates a clock from local wall-clock time.
    ///
    /// Returns `None` when the wall-clock time does not exist locally, as in
    /// a daylight-saving gap. Ambiguous times resolve to the earlier instant.
    #[must_use]
    pub fn from_local(now: NaiveDateTime) -> Option<Self> {
        Local.from_local_datetime(&now).earliest().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}
