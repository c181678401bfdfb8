use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::column::SearchKind;

/// Raw search input for one column, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValue {
    Text(String),
    /// Kept as typed so half-entered numbers such as `-` or `1.` survive.
    Number { value: String },
    DateRange {
        from: Option<String>,
        to: Option<String>,
    },
    Boolean(Option<bool>),
}

impl SearchValue {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchValue::Text(_) => SearchKind::Text,
            SearchValue::Number { .. } => SearchKind::Number,
            SearchValue::DateRange { .. } => SearchKind::DateRange,
            SearchValue::Boolean(_) => SearchKind::Boolean,
        }
    }

    /// Whether this value would narrow anything, ignoring column visibility.
    pub fn is_populated(&self) -> bool {
        match self {
            SearchValue::Text(text) => !text.trim().is_empty(),
            SearchValue::Number { value } => !value.trim().is_empty(),
            SearchValue::DateRange { from, to } => from.is_some() || to.is_some(),
            SearchValue::Boolean(flag) => flag.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEdge {
    From,
    To,
}

pub type SearchValuesState = BTreeMap<String, SearchValue>;

/// Normalized filter value sent to the host search callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Criterion {
    Text(String),
    Number(serde_json::Number),
    DateRange {
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
    Boolean(bool),
}

pub type Criteria = BTreeMap<String, Criterion>;
