//! Fetch and persist plumbing shared by the server-paged pages.

use std::sync::Arc;

use dioxus::prelude::*;

use crate::domain::entities::search::Criteria;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::RemoteGrid;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::visibility_service::VisibilityService;

/// Loads the hidden search fields for the grid's page key.
pub fn load_visibility(remote: RemoteGrid, visibility: Arc<VisibilityService>) {
    let mut grid = remote.grid;
    let page_key = grid.peek().visibility.page_key().clone();
    spawn(async move {
        match run_blocking(|| visibility.load(&page_key)) {
            Ok(fields) => grid.write().visibility.load(fields),
            Err(err) => {
                tracing::warn!(page_key = %page_key, "loading field visibility failed: {err}");
                grid.write()
                    .set_error(Some(format!("載入欄位設定失敗：{err}")));
            }
        }
    });
}

/// Fetches the first page for `criteria` and remembers them for load-more.
pub fn run_search(remote: RemoteGrid, query: Arc<QueryService>, criteria: Criteria) {
    let RemoteGrid {
        mut grid,
        mut last_criteria,
    } = remote;
    last_criteria.set(criteria.clone());
    let request = grid.write().begin_search();
    let page_key = grid.peek().visibility.page_key().clone();
    spawn(async move {
        let result = run_blocking(|| query.query_page(&page_key, 1, &criteria));
        let mut model = grid.write();
        match result {
            Ok(page) => {
                model.apply_page(request, 1, page);
            }
            Err(err) => {
                model.fail_request(request, err.to_string());
            }
        }
    });
}

/// Fetches the page after the last one delivered, with the last search's
/// criteria.
pub fn run_load_more(remote: RemoteGrid, query: Arc<QueryService>) {
    let mut grid = remote.grid;
    if !grid.peek().pagination.can_load_more() {
        return;
    }
    let criteria = remote.last_criteria.peek().clone();
    let (request, page) = grid.write().begin_load_more();
    let page_key = grid.peek().visibility.page_key().clone();
    spawn(async move {
        let result = run_blocking(|| query.query_page(&page_key, page, &criteria));
        let mut model = grid.write();
        match result {
            Ok(rows) => {
                model.apply_page(request, page, rows);
            }
            Err(err) => {
                model.fail_request(request, err.to_string());
            }
        }
    });
}

/// Writes committed hidden fields in the background. The grid already shows
/// the new settings; a failure leaves a retry banner.
pub fn persist_visibility(
    remote: RemoteGrid,
    visibility: Arc<VisibilityService>,
    update: VisibilityUpdate,
) {
    let mut grid = remote.grid;
    spawn(async move {
        let result = run_blocking(|| visibility.persist(&update));
        let mut model = grid.write();
        match result {
            Ok(()) => model.visibility.persist_succeeded(&update),
            Err(err) => model.visibility.persist_failed(update, err.to_string()),
        }
    });
}
