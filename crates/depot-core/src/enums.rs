//! Status tag for notification events.
//!
//! Unlike a closed state machine, `EventStatus` is an open set of named
//! states: the well-known ones get their own variant and anything else is
//! carried verbatim in `Other`. The known states use the upper snake case
//! wire names `SUCCESS`, `FAILED` and `IN_PROGRESS`; matching is exact.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// EventStatus
// ---------------------------------------------------------------------------

/// Outcome state of one refresh attempt.
///
/// ```text
/// IN_PROGRESS → SUCCESS
///             → FAILED
/// ```
///
/// Transitions are not enforced; producers may write any status at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Success,
    Failed,
    InProgress,
    /// Any other named state, kept exactly as written.
    Other(String),
}

impl EventStatus {
    /// Map the `success` search flag onto the matching terminal status.
    #[must_use]
    pub const fn from_success(success: bool) -> Self {
        if success { Self::Success } else { Self::Failed }
    }

    /// Whether the operation will not be retried under the same event id.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// Return the string representation used in SQL storage and JSON.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::InProgress => "IN_PROGRESS",
            Self::Other(name) => name,
        }
    }

    /// Parse a status name exactly. Only the wire names map to the known
    /// variants; anything else is kept verbatim so `as_str` returns it intact.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            "IN_PROGRESS" => Self::InProgress,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for EventStatus {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for EventStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl JsonSchema for EventStatus {
    fn schema_name() -> Cow<'static, str> {
        "EventStatus".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "minLength": 1,
            "examples": ["SUCCESS", "FAILED", "IN_PROGRESS"]
        })
    }
}
