use dioxus::prelude::*;
use serde_json::Value;

use crate::domain::entities::column::{Column, ColumnSchema, SelectOption};
use crate::domain::entities::job::{
    ActiveStatus, ACTIVE_STATUS_LABELS, JOB_PAGE_KEY, JOB_STATUS_LABELS,
};
use crate::domain::entities::page::PageKey;
use crate::domain::entities::row::Row;
use crate::domain::entities::search::Criteria;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::data_grid::DataGrid;
use crate::ui::pages::remote::{load_visibility, persist_visibility, run_load_more, run_search};
use crate::ui::state::app_state::{AppServices, RemoteGrid};
use crate::usecase::grid::{GridModel, RowOwnership};

pub fn job_schema() -> ColumnSchema {
    let active_options = [ActiveStatus::Active, ActiveStatus::Inactive]
        .into_iter()
        .map(|status| {
            let label = ACTIVE_STATUS_LABELS
                .iter()
                .find(|(code, _)| *code == status.code())
                .map(|(_, label)| *label)
                .unwrap_or(status.code());
            SelectOption::new(label, status.code())
        })
        .collect();

    ColumnSchema::new(vec![
        Column::text("jobName", "Task Name").with_width(200),
        Column::text("taskGroup", "Task Group").with_width(200),
        Column::select("activeStatus", "Active", active_options).with_width(120),
        Column::datetime("lastExecutionTime", "Execute time")
            .with_display_date_format("yyyy-MM-dd HH:mm:ss")
            .with_width(200),
        Column::text("lastExecutionStatus", "Execute result")
            .with_status_labels(JOB_STATUS_LABELS)
            .with_hint_field("resultMessage")
            .with_width(200),
        Column::action("actions", "Run").with_width(120),
    ])
}

#[component]
pub fn JobManagementPage(mut status: Signal<String>) -> Element {
    let services = use_context::<AppServices>();
    let remote = RemoteGrid::new(|| {
        GridModel::new(
            job_schema(),
            PageKey::from(JOB_PAGE_KEY),
            RowOwnership::External,
            true,
        )
    });

    let services_for_mount = services.clone();
    use_effect(move || {
        load_visibility(remote, services_for_mount.visibility.clone());
        run_search(remote, services_for_mount.query.clone(), Criteria::new());
    });

    let query_for_search = services.query.clone();
    let query_for_more = services.query.clone();
    let query_for_launch = services.query.clone();
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
            on_action: move |row: Row| {
                let Some(job_name) = row
                    .get("jobName")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                else {
                    return;
                };
                let query = query_for_launch.clone();
                spawn(async move {
                    match run_blocking(|| query.launch_job(&job_name)) {
                        Ok(()) => {
                            status.set(format!("已送出執行：{job_name}"));
                            let criteria = remote.last_criteria.peek().clone();
                            run_search(remote, query, criteria);
                        }
                        Err(err) => {
                            status.set(format!("執行失敗：{err}"));
                            let mut grid = remote.grid;
                            grid.write().set_error(Some(err.to_string()));
                        }
                    }
                });
            },
        }
    }
}
