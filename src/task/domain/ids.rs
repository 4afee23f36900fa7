//! Identifier type for task records.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque, service-assigned task identifier.
///
/// The service currently sends integers; strings are accepted as well and
/// the textual form is kept either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates an identifier from its textual form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawTaskId::deserialize(deserializer)? {
            RawTaskId::Unsigned(value) => value.to_string(),
            RawTaskId::Signed(value) => value.to_string(),
            RawTaskId::Text(value) => value,
        };
        Ok(Self(id))
    }
}
