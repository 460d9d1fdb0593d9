//! Notification search criteria and the SQL predicate built from them.
//!
//! Every criterion is optional and contributes one equality (or range)
//! clause when set; clauses are ANDed. The time window always applies to
//! `last_updated` and always has an upper bound: `to_date` when given,
//! otherwise the `now` passed to [`NotificationFilter::compose`].

use chrono::{DateTime, Utc};
use depot_core::entities::Coordinate;
use depot_core::enums::EventStatus;

use crate::helpers::to_millis;

/// Filter criteria for notification searches.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotificationFilter {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version_id: Option<String>,
    pub parent_event_id: Option<String>,
    /// `true` matches `SUCCESS`, `false` matches `FAILED`.
    pub success: Option<bool>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

/// A composed `WHERE` predicate with positional parameters.
#[derive(Debug, Clone)]
pub struct ComposedQuery {
    pub conditions: Vec<String>,
    pub params: Vec<libsql::Value>,
}

impl ComposedQuery {
    /// `WHERE a AND b ...`. Never empty: the upper time bound is always present.
    #[must_use]
    pub fn where_clause(&self) -> String {
        format!("WHERE {}", self.conditions.join(" AND "))
    }

    fn push(&mut self, column: &str, op: &str, value: libsql::Value) {
        self.params.push(value);
        self.conditions
            .push(format!("{column} {op} ?{}", self.params.len()));
    }
}

impl NotificationFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn artifact(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    #[must_use]
    pub fn coordinate(self, coordinate: Coordinate) -> Self {
        self.group(coordinate.group_id)
            .artifact(coordinate.artifact_id)
            .version(coordinate.version_id)
    }

    #[must_use]
    pub fn parent(mut self, parent_event_id: impl Into<String>) -> Self {
        self.parent_event_id = Some(parent_event_id.into());
        self
    }

    #[must_use]
    pub const fn success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    #[must_use]
    pub const fn since(mut self, from_date: DateTime<Utc>) -> Self {
        self.from_date = Some(from_date);
        self
    }

    #[must_use]
    pub const fn until(mut self, to_date: DateTime<Utc>) -> Self {
        self.to_date = Some(to_date);
        self
    }

    /// Upper bound of the time window for a search evaluated at `now`.
    #[must_use]
    pub fn upper_bound(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.to_date.unwrap_or(now)
    }

    /// Build the conjunctive predicate, defaulting the upper bound to `now`.
    #[must_use]
    pub fn compose(&self, now: DateTime<Utc>) -> ComposedQuery {
        let mut query = ComposedQuery {
            conditions: Vec::new(),
            params: Vec::new(),
        };

        query.push(
            "last_updated",
            "<=",
            libsql::Value::Integer(to_millis(self.upper_bound(now))),
        );
        if let Some(from) = self.from_date {
            query.push(
                "last_updated",
                ">=",
                libsql::Value::Integer(to_millis(from)),
            );
        }

        let equalities = [
            ("group_id", &self.group_id),
            ("artifact_id", &self.artifact_id),
            ("version_id", &self.version_id),
            ("parent_event_id", &self.parent_event_id),
        ];
        // An empty criterion still applies; empty values are stored as NULL,
        // so it matches nothing.
        for (column, value) in equalities {
            if let Some(value) = value {
                query.push(column, "=", libsql::Value::Text(value.clone()));
            }
        }

        if let Some(success) = self.success {
            let status = EventStatus::from_success(success);
            query.push("status", "=", libsql::Value::Text(status.as_str().to_string()));
        }

        query
    }
}
