use dioxus::prelude::*;

use crate::domain::entities::column::{Column, ColumnSchema};
use crate::domain::entities::page::PageKey;
use crate::domain::entities::row::Row;
use crate::domain::entities::search::Criteria;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::domain::entities::stock::WATCHLIST_PAGE_KEY;
use crate::ui::components::data_grid::DataGrid;
use crate::ui::pages::remote::{load_visibility, persist_visibility, run_load_more, run_search};
use crate::ui::state::app_state::{AppServices, RemoteGrid};
use crate::usecase::grid::{GridModel, RowOwnership};

pub fn watchlist_schema() -> ColumnSchema {
    ColumnSchema::new(vec![
        Column::text("symbol", "Symbol").uppercase().with_width(200),
        Column::date("quoteDate", "Quote Date")
            .with_display_date_format("yyyy-MM-dd")
            .with_width(200),
        Column::number("closePrice", "Close Price").with_width(200),
        Column::number("stockPe", "PE").with_width(200),
    ])
}

/// Rows are fetched only on an explicit Search or load-more.
#[component]
pub fn WatchlistPage() -> Element {
    let services = use_context::<AppServices>();
    let remote = RemoteGrid::new(|| {
        GridModel::new(
            watchlist_schema(),
            PageKey::from(WATCHLIST_PAGE_KEY),
            RowOwnership::External,
            true,
        )
    });

    let visibility_for_mount = services.visibility.clone();
    use_effect(move || load_visibility(remote, visibility_for_mount.clone()));

    let query_for_search = services.query.clone();
    let query_for_more = services.query.clone();
    let visibility_for_save = services.visibility.clone();

    rsx! {
        DataGrid {
            grid: remote.grid,
            panel: services.panel_settings(),
            on_search: move |criteria: Criteria| run_search(remote, query_for_search.clone(), criteria),
            on_load_more: move |_: ()| run_load_more(remote, query_for_more.clone()),
            on_visibility_save: move |update: VisibilityUpdate| {
                persist_visibility(remote, visibility_for_save.clone(), update)
            },
            on_action: move |_row: Row| {},
        }
    }
}
