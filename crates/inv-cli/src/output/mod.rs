use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns that lead a table when present; the rest follow alphabetically.
const LEADING_COLUMNS: [&str; 3] = ["id", "created_at", "kind"];

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
    match unwrap_envelope(serde_json::to_value(value)?) {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => Ok(render_record_table(map)),
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

/// List responses are `{ "devices": [...] }`; tabulate the list itself.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_array) => map
            .into_iter()
            .next()
            .map_or(Value::Null, |(_, inner)| inner),
        other => other,
    }
}

fn render_record_table(map: Map<String, Value>) -> String {
    let keys = order_columns(map.keys().cloned().collect());
    let rows = keys
        .iter()
        .map(|key| vec![key.clone(), map.get(key).map_or_else(String::new, value_to_cell)])
        .collect::<Vec<_>>();
    table::render_entity_table(&["key", "value"], &rows, table_options())
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    let headers = order_columns(headers);

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn order_columns(mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by_key(|key| {
        let rank = LEADING_COLUMNS
            .iter()
            .position(|lead| *lead == key.as_str())
            .unwrap_or(LEADING_COLUMNS.len());
        (rank, key.clone())
    });
    keys
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        // Tagged single-field objects such as a device identifier.
        Value::Object(map) if map.len() == 1 => map
            .iter()
            .map(|(tag, inner)| format!("{tag}:{}", value_to_cell(inner)))
            .collect(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{order_columns, render, unwrap_envelope, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        quantity: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            id: "prt-1",
            quantity: 7,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "prt-1");
        assert_eq!(parsed["quantity"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            id: "prt-1",
            quantity: 7,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example {
            id: "prt-1",
            quantity: 7,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("key"));
        assert!(lines[2].starts_with("id"));
        assert!(lines[3].starts_with("quantity"));
    }

    #[test]
    fn list_envelope_renders_as_rows() {
        let value = json!({ "parts": [{ "id": "prt-1", "quantity": 3 }, { "id": "prt-2", "quantity": 4 }] });
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[2].starts_with("prt-1"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let out = render(&json!({ "devices": [] }), OutputFormat::Table).expect("render");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn multi_field_objects_are_not_unwrapped() {
        let value = json!({ "entries": [], "device_id": "dev-1" });
        assert_eq!(unwrap_envelope(value.clone()), value);
    }

    #[test]
    fn identifier_cell_shows_tag() {
        assert_eq!(value_to_cell(&json!({ "imei": "490154203237518" })), "imei:490154203237518");
        assert_eq!(value_to_cell(&json!(null)), "-");
    }

    #[test]
    fn leading_columns_come_first() {
        let ordered = order_columns(vec![
            "notes".to_string(),
            "kind".to_string(),
            "id".to_string(),
            "created_at".to_string(),
            "device_id".to_string(),
        ]);
        assert_eq!(ordered, vec!["id", "created_at", "kind", "device_id", "notes"]);
    }
}
