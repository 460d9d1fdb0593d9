use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown first, in this order, when an array of events is rendered
/// as a table. Any other keys follow alphabetically.
const EVENT_COLUMNS: &[&str] = &[
    "eventId",
    "status",
    "groupId",
    "artifactId",
    "versionId",
    "parentEventId",
    "lastUpdated",
    "createdAt",
    "detail",
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by_key(|(key, _)| column_rank(key));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        Value::Null => Ok(String::from("(not found)")),
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers.sort_by_key(|key| column_rank(key));

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

/// Known event columns first (in `EVENT_COLUMNS` order), then the rest by name.
fn column_rank(key: &str) -> (usize, String) {
    let rank = EVENT_COLUMNS
        .iter()
        .position(|column| *column == key)
        .unwrap_or(EVENT_COLUMNS.len());
    (rank, key.to_string())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use depot_core::entities::{Coordinate, NotificationEvent};
    use depot_core::enums::EventStatus;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    fn sample() -> NotificationEvent {
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 8, 30, 0).unwrap();
        NotificationEvent::new("evt-1", EventStatus::Failed, at)
            .with_coordinate(Coordinate::new("org.example", "widget", "2.0.0"))
            .with_detail(json!({"error": "timeout"}))
    }

    #[test]
    fn json_render_uses_wire_field_names() {
        let out = render(&sample(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["eventId"], "evt-1");
        assert_eq!(parsed["status"], "FAILED");
        assert!(parsed.get("parentEventId").is_none());
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&vec![sample(), sample()], OutputFormat::Raw).expect("raw render");
        assert!(!out.contains('\n'));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).expect("json array");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn event_table_leads_with_identity_columns() {
        let out = render(&vec![sample()], OutputFormat::Table).expect("table render");
        let header = out.lines().next().expect("header line");
        let id_at = header.find("eventId").expect("eventId column");
        let status_at = header.find("status").expect("status column");
        let detail_at = header.find("detail").expect("detail column");
        assert!(id_at < status_at);
        assert!(status_at < detail_at);
        assert!(out.contains("org.example"));
        assert!(out.contains(r#"{"error":"timeout"}"#));
    }

    #[test]
    fn missing_columns_render_as_dash() {
        let bare = NotificationEvent::new("evt-2", EventStatus::Success, Utc::now());
        let out = render(&vec![sample(), bare], OutputFormat::Table).expect("table render");
        let last = out.lines().last().expect("row");
        assert!(last.starts_with("evt-2"));
        assert!(last.contains(" - "));
    }

    #[test]
    fn empty_list_and_absent_event_have_placeholders() {
        let empty: Vec<NotificationEvent> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Table).unwrap(), "(no rows)");
        let absent: Option<NotificationEvent> = None;
        assert_eq!(render(&absent, OutputFormat::Table).unwrap(), "(not found)");
        assert_eq!(render(&absent, OutputFormat::Json).unwrap(), "null");
    }
}
