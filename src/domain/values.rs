//! Coercions from untyped cell values. Every function returns `None` on
//! input it cannot interpret; callers decide what a miss means.

use serde_json::Value;

use crate::domain::date_format::{parse_date, ParsedDate};
use crate::domain::entities::row::cell_text;

pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|number| number.is_finite())
}

pub fn cell_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Null counts as `false`; strings must spell out a boolean.
pub fn cell_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "y" | "yes" => Some(true),
            "false" | "0" | "n" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn cell_date(value: &Value, source_format: Option<&str>) -> Option<ParsedDate> {
    match value {
        Value::String(text) => parse_date(text, source_format),
        Value::Number(number) => parse_date(&number.to_string(), source_format),
        _ => None,
    }
}

/// Case-insensitive substring test; `needle` is expected to be trimmed.
pub fn text_contains(value: &Value, needle: &str) -> bool {
    cell_text(value)
        .map(|text| text.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Numbers that are whole and fit in i64 are kept integral so payloads read
/// `42`, not `42.0`.
pub fn json_number(number: f64) -> Option<serde_json::Number> {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Some(serde_json::Number::from(number as i64))
    } else {
        serde_json::Number::from_f64(number)
    }
}
