use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::entities::column::ColumnSchema;
use crate::domain::entities::edit::{CellEdit, CellKey};
use crate::domain::entities::page::{PageKey, PageResult};
use crate::domain::entities::row::Row;
use crate::domain::entities::search::Criteria;
use crate::usecase::field_visibility::FieldVisibilityConfig;
use crate::usecase::filter::criteria_store::FilterCriteriaStore;
use crate::usecase::filter::predicate::{active_criteria, row_matches};
use crate::usecase::pagination::PaginationCoordinator;
use crate::usecase::request::{RequestId, RequestTracker};
use crate::usecase::sort_engine::SortEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOwnership {
    /// Host supplies rows (server paging); adding rows is not offered.
    External,
    /// Grid keeps its own rows and supports local add-row editing.
    Owned,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("row {0} is out of range")]
    RowOutOfRange(usize),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column {0} is not editable")]
    ReadOnlyColumn(String),
}

/// Everything one grid instance needs: schema, rows and the query engines.
#[derive(Debug, Clone)]
pub struct GridModel {
    schema: Arc<ColumnSchema>,
    ownership: RowOwnership,
    rows: Vec<Row>,
    pub criteria: FilterCriteriaStore,
    pub sort: SortEngine,
    pub visibility: FieldVisibilityConfig,
    pub pagination: PaginationCoordinator,
    requests: RequestTracker,
    in_flight: Option<RequestId>,
    error: Option<String>,
}

impl GridModel {
    pub fn new(
        schema: ColumnSchema,
        page_key: PageKey,
        ownership: RowOwnership,
        infinite_scroll: bool,
    ) -> Self {
        let schema = Arc::new(schema);
        Self {
            criteria: FilterCriteriaStore::new(schema.clone()),
            schema,
            ownership,
            rows: Vec::new(),
            sort: SortEngine::new(),
            visibility: FieldVisibilityConfig::new(page_key),
            pagination: PaginationCoordinator::new(infinite_scroll),
            requests: RequestTracker::new(),
            in_flight: None,
            error: None,
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn ownership(&self) -> &RowOwnership {
        &self.ownership
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Indices into `rows()` in display order: sorted, then filtered by the
    /// live search values.
    pub fn visible_row_indices(&self) -> Vec<usize> {
        let active = active_criteria(
            &self.schema,
            self.criteria.values(),
            self.visibility.committed(),
        );
        self.sort
            .sorted_indices(&self.rows)
            .into_iter()
            .filter(|&idx| active.is_empty() || row_matches(&self.rows[idx], &active))
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible_row_indices()
            .into_iter()
            .map(|idx| &self.rows[idx])
            .collect()
    }

    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        match self.schema.get(column_id) {
            Some(column) => self.sort.toggle(column),
            None => false,
        }
    }

    /// Criteria for an explicit search, honouring hidden fields.
    pub fn build_criteria(&self) -> Criteria {
        self.criteria.build_criteria(self.visibility.committed())
    }

    /// Clears search input and sort.
    pub fn clear(&mut self) {
        self.criteria.clear_all();
        self.sort.clear();
    }

    /// Starts a fetch for the first page of a new search. Returns the request
    /// id to hand back with the response.
    pub fn begin_search(&mut self) -> RequestId {
        self.pagination.reset();
        self.pagination.begin_load();
        let id = self.requests.issue();
        self.in_flight = Some(id);
        id
    }

    /// Starts a fetch for the next page. Returns the page number to request.
    pub fn begin_load_more(&mut self) -> (RequestId, u32) {
        let page = self.pagination.begin_load();
        let id = self.requests.issue();
        self.in_flight = Some(id);
        (id, page)
    }

    /// Applies a page response. Responses for superseded requests are dropped
    /// and reported as `false`.
    pub fn apply_page(&mut self, id: RequestId, page: u32, result: PageResult) -> bool {
        if !self.requests.is_current(id) {
            tracing::debug!(?id, page, "dropping stale page response");
            return false;
        }
        self.in_flight = None;
        self.error = None;
        if page <= 1 {
            self.rows = result.rows;
        } else {
            self.rows.extend(result.rows);
        }
        self.pagination
            .complete_page(page, self.rows.len() as u64, result.total);
        true
    }

    pub fn fail_request(&mut self, id: RequestId, error: impl Into<String>) -> bool {
        if !self.requests.is_current(id) {
            return false;
        }
        self.in_flight = None;
        self.pagination.fail_load();
        self.error = Some(error.into());
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Appends an empty row. Only grids that own their rows allow it.
    pub fn add_row(&mut self) -> bool {
        if self.ownership != RowOwnership::Owned {
            return false;
        }
        self.rows.push(self.schema.empty_row());
        true
    }

    /// Applies the edit locally, then runs the column's edit hook with the
    /// updated row. Hook failures are logged and the edit is kept.
    pub fn edit_cell(&mut self, edit: CellEdit) -> Result<(), GridError> {
        let column = self
            .schema
            .get(&edit.cell.column)
            .ok_or_else(|| GridError::UnknownColumn(edit.cell.column.clone()))?;
        if column.is_action_column {
            return Err(GridError::ReadOnlyColumn(column.id.clone()));
        }
        let hook = column.on_edit.clone();

        let row = self
            .rows
            .get_mut(edit.cell.row_idx)
            .ok_or(GridError::RowOutOfRange(edit.cell.row_idx))?;
        row.insert(edit.cell.column.clone(), edit.value.clone());

        if let Some(hook) = hook {
            if let Err(err) = hook.call(&edit.value, row) {
                tracing::warn!(
                    column = %edit.cell.column,
                    row = edit.cell.row_idx,
                    "cell edit hook failed: {err:#}"
                );
            }
        }
        Ok(())
    }

    pub fn set_cell_text(
        &mut self,
        row_idx: usize,
        column_id: &str,
        text: &str,
    ) -> Result<(), GridError> {
        self.edit_cell(CellEdit {
            cell: CellKey {
                row_idx,
                column: column_id.to_string(),
            },
            value: Value::String(text.to_string()),
        })
    }
}
