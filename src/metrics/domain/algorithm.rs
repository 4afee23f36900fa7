//! Scheduling algorithm keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling algorithm a metrics result was computed for.
///
/// Keys are matched case-insensitively; unrecognised keys are kept verbatim
/// and sort after the known algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    /// First come, first served.
    Fcfs,
    /// Longest job first.
    Ljf,
    /// Last in, first out.
    Lifo,
    /// Any other key reported by the service.
    Other(String),
}

impl Algorithm {
    /// Known algorithms in display order.
    pub const DISPLAY_ORDER: [Self; 3] = [Self::Fcfs, Self::Ljf, Self::Lifo];

    /// Returns the wire key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Ljf => "ljf",
            Self::Lifo => "lifo",
            Self::Other(key) => key,
        }
    }

    /// Returns the position in the fixed display order.
    #[must_use]
    pub const fn display_rank(&self) -> u8 {
        match self {
            Self::Fcfs => 0,
            Self::Ljf => 1,
            Self::Lifo => 2,
            Self::Other(_) => 3,
        }
    }

    /// Returns the heading shown above the algorithm's chart.
    #[must_use]
    pub fn heading(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl From<&str> for Algorithm {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Self::Fcfs,
            "ljf" => Self::Ljf,
            "lifo" => Self::Lifo,
            _ => Self::Other(value.to_owned()),
        }
    }
}

impl From<String> for Algorithm {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        match value {
            Algorithm::Other(key) => key,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
