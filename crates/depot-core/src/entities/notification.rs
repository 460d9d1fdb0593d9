use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Coordinate;
use crate::enums::EventStatus;

/// One ledger entry: a single attempt of an artifact refresh and its outcome.
///
/// `event_id` is the identity key. Writing an event whose id already exists
/// replaces the stored record. Unset optional fields are omitted from the
/// serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub event_id: String,
    /// Event that triggered this attempt (retry or cascading refresh).
    /// Not required to exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl NotificationEvent {
    /// Start a new event; `created_at` and `last_updated` are both `now`.
    #[must_use]
    pub fn new(event_id: impl Into<String>, status: EventStatus, now: DateTime<Utc>) -> Self {
        Self {
            event_id: event_id.into(),
            parent_event_id: None,
            group_id: None,
            artifact_id: None,
            version_id: None,
            status,
            created_at: now,
            last_updated: now,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_event_id: impl Into<String>) -> Self {
        self.parent_event_id = Some(parent_event_id.into());
        self
    }

    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.group_id = Some(coordinate.group_id);
        self.artifact_id = Some(coordinate.artifact_id);
        self.version_id = Some(coordinate.version_id);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }

    #[must_use]
    pub const fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Completion form of this event: identity, parent, and coordinate are
    /// kept; status and detail are replaced. The store stamps `last_updated`.
    #[must_use]
    pub fn completed(mut self, status: EventStatus, detail: Option<serde_json::Value>) -> Self {
        self.status = status;
        self.detail = detail;
        self
    }

    /// Full coordinate, when all three parts are present.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (&self.group_id, &self.artifact_id, &self.version_id) {
            (Some(group), Some(artifact), Some(version)) => {
                Some(Coordinate::new(group, artifact, version))
            }
            _ => None,
        }
    }
}
