use std::collections::BTreeMap;

use serde_json::Value;

pub type Row = BTreeMap<String, Value>;

/// Missing keys and JSON nulls are the same thing to the grid.
pub fn cell<'a>(row: &'a Row, column_id: &str) -> Option<&'a Value> {
    match row.get(column_id) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}
