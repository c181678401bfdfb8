use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::row::Row;

/// Display type of a column. Filtering, criteria building, the search panel
/// and the cell formatter all dispatch on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Number,
    Select,
    Date,
    DateTime,
    Boolean,
    Action,
}

/// Shape of the search input a column kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Text,
    Number,
    DateRange,
    Boolean,
}

impl ColumnKind {
    pub fn search_kind(self) -> Option<SearchKind> {
        match self {
            ColumnKind::Text | ColumnKind::Select => Some(SearchKind::Text),
            ColumnKind::Number => Some(SearchKind::Number),
            ColumnKind::Date | ColumnKind::DateTime => Some(SearchKind::DateRange),
            ColumnKind::Boolean => Some(SearchKind::Boolean),
            ColumnKind::Action => None,
        }
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, ColumnKind::Date | ColumnKind::DateTime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

type EditFn = dyn Fn(&Value, &Row) -> anyhow::Result<()> + Send + Sync;

/// Side-effect hook run after a cell edit has been applied locally.
#[derive(Clone)]
pub struct EditHook(Arc<EditFn>);

impl EditHook {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&Value, &Row) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(hook))
    }

    pub fn call(&self, new_value: &Value, updated_row: &Row) -> anyhow::Result<()> {
        (self.0)(new_value, updated_row)
    }
}

impl PartialEq for EditHook {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EditHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EditHook(..)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub kind: ColumnKind,
    pub select_options: Vec<SelectOption>,
    pub sortable: bool,
    pub is_action_column: bool,
    pub source_date_format: Option<String>,
    pub display_date_format: Option<String>,
    pub uppercase_input: bool,
    pub width: Option<u32>,
    pub status_labels: Vec<(String, String)>,
    /// Row field shown as a tooltip over the cell.
    pub hint_field: Option<String>,
    pub on_edit: Option<EditHook>,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        let is_action = kind == ColumnKind::Action;
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            select_options: Vec::new(),
            sortable: !is_action,
            is_action_column: is_action,
            source_date_format: None,
            display_date_format: None,
            uppercase_input: false,
            width: None,
            status_labels: Vec::new(),
            hint_field: None,
            on_edit: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnKind::Text)
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnKind::Number)
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let mut column = Self::new(id, label, ColumnKind::Select);
        column.select_options = options;
        column
    }

    pub fn date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnKind::Date)
    }

    pub fn datetime(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnKind::DateTime)
    }

    pub fn boolean(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnKind::Boolean)
    }

    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnKind::Action)
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_source_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.source_date_format = Some(pattern.into());
        self
    }

    pub fn with_display_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.display_date_format = Some(pattern.into());
        self
    }

    pub fn with_status_labels(mut self, labels: &[(&str, &str)]) -> Self {
        self.status_labels = labels
            .iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect();
        self
    }

    pub fn with_hint_field(mut self, field: impl Into<String>) -> Self {
        self.hint_field = Some(field.into());
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase_input = true;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn on_edit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value, &Row) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on_edit = Some(EditHook::new(hook));
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable && !self.is_action_column && self.kind != ColumnKind::Action
    }

    pub fn search_kind(&self) -> Option<SearchKind> {
        if self.is_action_column {
            return None;
        }
        self.kind.search_kind()
    }

    pub fn is_searchable(&self) -> bool {
        self.search_kind().is_some()
    }
}

/// Immutable list of columns for one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn searchable(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_searchable())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn empty_row(&self) -> Row {
        self.columns
            .iter()
            .filter(|column| !column.is_action_column)
            .map(|column| (column.id.clone(), Value::String(String::new())))
            .collect()
    }
}
