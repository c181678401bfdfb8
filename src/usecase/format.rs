use serde_json::Value;

use crate::domain::date_format::{DatePattern, DEFAULT_DISPLAY_FORMAT};
use crate::domain::entities::column::{Column, ColumnKind};
use crate::domain::entities::row::cell_text;
use crate::domain::values::cell_date;

pub const EMPTY_CELL: &str = "-";

/// Display text for a read-only cell.
pub fn format_cell(column: &Column, value: Option<&Value>) -> String {
    let Some(text) = value.and_then(cell_text) else {
        return EMPTY_CELL.to_string();
    };
    if text.is_empty() {
        return EMPTY_CELL.to_string();
    }

    if !column.status_labels.is_empty() {
        return status_label(&column.status_labels, &text);
    }

    if column.kind.is_temporal() {
        return value
            .and_then(|v| format_date(column, v))
            .unwrap_or(text);
    }

    if column.kind == ColumnKind::Select {
        if let Some(option) = column.select_options.iter().find(|opt| opt.value == text) {
            return option.label.clone();
        }
    }

    text
}

fn format_date(column: &Column, value: &Value) -> Option<String> {
    let parsed = cell_date(value, column.source_date_format.as_deref())?;
    let pattern = DatePattern::new(
        column
            .display_date_format
            .as_deref()
            .unwrap_or(DEFAULT_DISPLAY_FORMAT),
    );
    pattern.format(&parsed.value)
}

/// Maps a status code to its label, matching codes case-insensitively.
/// Unknown codes are shown capitalized.
pub fn status_label(labels: &[(String, String)], code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return EMPTY_CELL.to_string();
    }
    let upper = code.to_uppercase();
    if let Some((_, label)) = labels.iter().find(|(known, _)| *known == upper) {
        return label.clone();
    }

    let lower = code.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
