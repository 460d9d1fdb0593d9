use chrono::{DateTime, NaiveDate, Utc};
use depot_core::entities::Coordinate;
use depot_core::enums::EventStatus;
use depot_db::query::NotificationFilter;
use serde_json::Value;

use crate::cli::subcommands::CoordinateArgs;

/// Parse a `--status` value. Case, surrounding space and `-`/`_` are
/// forgiven here so `in-progress` writes `IN_PROGRESS`; the ledger itself
/// stores names exactly.
pub fn parse_status(raw: &str) -> anyhow::Result<EventStatus> {
    let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
    if normalized.is_empty() {
        anyhow::bail!("invalid status '{raw}': must not be empty");
    }
    Ok(EventStatus::parse(&normalized))
}

/// Parse a boolean flag value (`true/false`, `yes/no`, `1/0`).
pub fn parse_bool(raw: &str, field: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => anyhow::bail!("invalid {field} '{raw}': expected true or false"),
    }
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` as midnight UTC.
pub fn parse_datetime(raw: &str, field: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            anyhow::anyhow!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD")
        })
}

/// Parse `--detail`: JSON when it parses, otherwise a JSON string.
#[must_use]
pub fn parse_detail(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Resolve coordinate flags into `(group, artifact, version)`, each optional.
pub fn coordinate_parts(
    args: &CoordinateArgs,
) -> anyhow::Result<(Option<String>, Option<String>, Option<String>)> {
    if let Some(raw) = &args.coordinate {
        let coordinate: Coordinate = raw.parse()?;
        return Ok((
            Some(coordinate.group_id),
            Some(coordinate.artifact_id),
            Some(coordinate.version_id),
        ));
    }
    Ok((
        args.group_id.clone(),
        args.artifact_id.clone(),
        args.version_id.clone(),
    ))
}

/// Apply coordinate flags to a search filter.
pub fn apply_coordinate(
    mut filter: NotificationFilter,
    args: &CoordinateArgs,
) -> anyhow::Result<NotificationFilter> {
    let (group, artifact, version) = coordinate_parts(args)?;
    filter.group_id = group;
    filter.artifact_id = artifact;
    filter.version_id = version;
    Ok(filter)
}
