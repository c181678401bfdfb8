//! Client-side row filtering over the rows already loaded.
//!
//! A row passes when it satisfies every active criterion. Cells that cannot be
//! interpreted (bad numbers, bad dates) make the row fail; they never abort the
//! pass.

use std::cmp::Ordering;

use crate::domain::date_format::{parse_iso, ParsedDate};
use crate::domain::entities::column::{Column, ColumnSchema, SearchKind};
use crate::domain::entities::row::{cell, Row};
use crate::domain::entities::search::{SearchValue, SearchValuesState};
use crate::domain::entities::visibility::DisabledFields;
use crate::domain::values::{cell_bool, cell_date, cell_number, parse_number, text_contains};

/// A criterion counts only when its column is visible in the search panel,
/// the stored value has the column's input shape, and it is non-empty.
pub fn is_active(column: &Column, value: &SearchValue, disabled: &DisabledFields) -> bool {
    if disabled.contains(&column.id) {
        return false;
    }
    if column.search_kind() != Some(value.kind()) {
        return false;
    }
    value.is_populated()
}

pub fn active_criteria<'a>(
    schema: &'a ColumnSchema,
    values: &'a SearchValuesState,
    disabled: &DisabledFields,
) -> Vec<(&'a Column, &'a SearchValue)> {
    schema
        .searchable()
        .filter_map(|column| {
            let value = values.get(&column.id)?;
            is_active(column, value, disabled).then_some((column, value))
        })
        .collect()
}

pub fn row_matches(row: &Row, active: &[(&Column, &SearchValue)]) -> bool {
    active
        .iter()
        .all(|(column, value)| criterion_matches(row, column, value))
}

pub fn filter_rows<'a, I>(
    rows: I,
    schema: &ColumnSchema,
    values: &SearchValuesState,
    disabled: &DisabledFields,
) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let active = active_criteria(schema, values, disabled);
    if active.is_empty() {
        return rows.into_iter().collect();
    }
    rows.into_iter()
        .filter(|row| row_matches(row, &active))
        .collect()
}

fn criterion_matches(row: &Row, column: &Column, value: &SearchValue) -> bool {
    let cell_value = cell(row, &column.id);

    match (column.search_kind(), value) {
        (Some(SearchKind::Text), SearchValue::Text(needle)) => {
            cell_value.is_some_and(|v| text_contains(v, needle.trim()))
        }
        (Some(SearchKind::Number), SearchValue::Number { value }) => {
            let Some(expected) = parse_number(value) else {
                return true;
            };
            cell_value
                .and_then(cell_number)
                .is_some_and(|actual| actual == expected)
        }
        (Some(SearchKind::DateRange), SearchValue::DateRange { from, to }) => {
            let Some(actual) =
                cell_value.and_then(|v| cell_date(v, column.source_date_format.as_deref()))
            else {
                return false;
            };
            date_within(&actual, from.as_deref(), to.as_deref())
        }
        (Some(SearchKind::Boolean), SearchValue::Boolean(Some(expected))) => {
            let actual = match cell_value {
                Some(v) => cell_bool(v),
                None => Some(false),
            };
            actual == Some(*expected)
        }
        (Some(SearchKind::Boolean), SearchValue::Boolean(None)) => true,
        _ => true,
    }
}

/// Inclusive range check. An absent or unparsable bound does not constrain
/// that side.
pub fn date_within(actual: &ParsedDate, from: Option<&str>, to: Option<&str>) -> bool {
    within_lower(actual, from) && within_upper(actual, to)
}

fn within_lower(actual: &ParsedDate, bound: Option<&str>) -> bool {
    match bound.and_then(parse_iso) {
        Some(bound) => compare_to_bound(actual, &bound) != Ordering::Less,
        None => true,
    }
}

fn within_upper(actual: &ParsedDate, bound: Option<&str>) -> bool {
    match bound.and_then(parse_iso) {
        Some(bound) => compare_to_bound(actual, &bound) != Ordering::Greater,
        None => true,
    }
}

/// Date-only bounds cover the whole day.
fn compare_to_bound(actual: &ParsedDate, bound: &ParsedDate) -> Ordering {
    if bound.date_only {
        actual.value.date().cmp(&bound.value.date())
    } else {
        actual.value.cmp(&bound.value)
    }
}
