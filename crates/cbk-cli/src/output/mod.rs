use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown first, in this order, when present. Others follow sorted.
const LEADING_COLUMNS: &[&str] = &[
    "id", "kind", "status", "severity", "title", "assignedTo", "at", "action", "targetId",
    "summary",
];

/// Columns dropped from list tables to keep rows on one line.
const HIDDEN_LIST_COLUMNS: &[&str] = &["notes", "details", "createdAt"];

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
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = order_columns(map.keys().map(String::as_str))
                .into_iter()
                .map(|key| vec![key.to_string(), value_to_cell(&map[key])])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
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

    let keys = items
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|map| map.keys().map(String::as_str))
        .filter(|key| !HIDDEN_LIST_COLUMNS.contains(key));
    let headers = order_columns(keys);

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&headers, &rows, table_options())
}

/// Deduplicate keys, leading columns first, then the rest alphabetically.
fn order_columns<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut rest: Vec<&str> = Vec::new();
    let mut leading: Vec<&str> = Vec::new();
    for key in keys {
        if leading.contains(&key) || rest.contains(&key) {
            continue;
        }
        if LEADING_COLUMNS.contains(&key) {
            leading.push(key);
        } else {
            rest.push(key);
        }
    }
    leading.sort_by_key(|key| LEADING_COLUMNS.iter().position(|c| c == key));
    rest.sort_unstable();
    leading.extend(rest);
    leading
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Object(map) if map.contains_key("name") && map.contains_key("role") => {
            format!(
                "{} ({})",
                map["name"].as_str().unwrap_or_default(),
                map["role"].as_str().unwrap_or_default()
            )
        }
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{order_columns, render, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        let third = out.lines().nth(2).expect("first row");
        assert!(third.starts_with("id"));
    }

    #[test]
    fn table_render_hides_bulky_list_columns() {
        let cases = json!([
            { "id": "m1", "status": "pending", "notes": ["a"], "title": "Spam" },
            { "id": "m2", "status": "approved", "notes": [], "title": "Avatar" }
        ]);
        let out = render(&cases, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header");
        assert!(!header.contains("notes"));
        assert!(header.find("id") < header.find("status"));
        assert!(header.find("status") < header.find("title"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let out = render(&json!([]), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn leading_columns_come_first() {
        let ordered = order_columns(["zeta", "status", "id", "alpha", "id"].into_iter());
        assert_eq!(ordered, ["id", "status", "alpha", "zeta"]);
    }

    #[test]
    fn actor_cells_are_compact() {
        let cell = value_to_cell(&json!({ "name": "dana", "role": "moderator" }));
        assert_eq!(cell, "dana (moderator)");
    }
}
