use std::sync::Arc;

use crate::domain::entities::column::{Column, ColumnSchema, SearchKind};
use crate::domain::entities::search::{
    Criteria, Criterion, DateEdge, SearchValue, SearchValuesState,
};
use crate::domain::entities::visibility::DisabledFields;
use crate::domain::values::{json_number, parse_number};
use crate::usecase::filter::predicate::is_active;

/// Typed search input for every searchable column of one page.
///
/// Setters touch exactly one entry and ignore ids that are unknown to the
/// schema, belong to an action column, or expect a different input shape.
#[derive(Debug, Clone)]
pub struct FilterCriteriaStore {
    schema: Arc<ColumnSchema>,
    values: SearchValuesState,
}

impl FilterCriteriaStore {
    pub fn new(schema: Arc<ColumnSchema>) -> Self {
        Self {
            schema,
            values: SearchValuesState::new(),
        }
    }

    pub fn values(&self) -> &SearchValuesState {
        &self.values
    }

    pub fn get(&self, column_id: &str) -> Option<&SearchValue> {
        self.values.get(column_id)
    }

    pub fn set_text(&mut self, column_id: &str, value: &str) -> bool {
        let Some(column) = self.column_for(column_id, SearchKind::Text) else {
            return false;
        };
        let value = if column.uppercase_input {
            value.to_uppercase()
        } else {
            value.to_string()
        };
        self.values
            .insert(column_id.to_string(), SearchValue::Text(value));
        true
    }

    pub fn set_number(&mut self, column_id: &str, raw: &str) -> bool {
        if self.column_for(column_id, SearchKind::Number).is_none() {
            return false;
        }
        self.values.insert(
            column_id.to_string(),
            SearchValue::Number {
                value: raw.to_string(),
            },
        );
        true
    }

    pub fn set_date_range(&mut self, column_id: &str, edge: DateEdge, value: &str) -> bool {
        if self.column_for(column_id, SearchKind::DateRange).is_none() {
            return false;
        }

        let (mut from, mut to) = match self.values.get(column_id) {
            Some(SearchValue::DateRange { from, to }) => (from.clone(), to.clone()),
            _ => (None, None),
        };
        let value = (!value.trim().is_empty()).then(|| value.to_string());
        match edge {
            DateEdge::From => from = value,
            DateEdge::To => to = value,
        }

        self.values
            .insert(column_id.to_string(), SearchValue::DateRange { from, to });
        true
    }

    pub fn set_boolean(&mut self, column_id: &str, value: Option<bool>) -> bool {
        if self.column_for(column_id, SearchKind::Boolean).is_none() {
            return false;
        }
        match value {
            Some(flag) => {
                self.values
                    .insert(column_id.to_string(), SearchValue::Boolean(Some(flag)));
            }
            None => {
                self.values.remove(column_id);
            }
        }
        true
    }

    pub fn clear_all(&mut self) {
        self.values.clear();
    }

    /// Sparse payload for the host search callback: only active entries,
    /// normalized per kind.
    pub fn build_criteria(&self, disabled: &DisabledFields) -> Criteria {
        let mut criteria = Criteria::new();

        for column in self.schema.searchable() {
            let Some(value) = self.values.get(&column.id) else {
                continue;
            };
            if !is_active(column, value, disabled) {
                continue;
            }
            if let Some(criterion) = normalize(value) {
                criteria.insert(column.id.clone(), criterion);
            }
        }

        criteria
    }

    fn column_for(&self, column_id: &str, expected: SearchKind) -> Option<&Column> {
        let column = self.schema.get(column_id)?;
        if column.search_kind() != Some(expected) {
            tracing::debug!(
                column = column_id,
                ?expected,
                "ignoring search input for mismatched column"
            );
            return None;
        }
        Some(column)
    }
}

fn normalize(value: &SearchValue) -> Option<Criterion> {
    match value {
        SearchValue::Text(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| Criterion::Text(text.to_string()))
        }
        SearchValue::Number { value } => parse_number(value)
            .and_then(json_number)
            .map(Criterion::Number),
        SearchValue::DateRange { from, to } => {
            (from.is_some() || to.is_some()).then(|| Criterion::DateRange {
                from: from.clone(),
                to: to.clone(),
            })
        }
        SearchValue::Boolean(flag) => flag.map(Criterion::Boolean),
    }
}
