use anyhow::bail;
use dioxus::prelude::*;
use serde_json::Value;

use crate::domain::entities::column::{Column, ColumnSchema, SelectOption};
use crate::domain::entities::job::{ActiveStatus, ACTIVE_STATUS_LABELS, TASK_GROUPS};
use crate::domain::entities::page::PageKey;
use crate::domain::entities::row::Row;
use crate::domain::entities::search::Criteria;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::ui::components::data_grid::DataGrid;
use crate::ui::pages::remote::{load_visibility, persist_visibility};
use crate::ui::state::app_state::{AppServices, RemoteGrid};
use crate::usecase::grid::{GridModel, RowOwnership};

pub const JOB_DRAFTS_PAGE_KEY: &str = "Job Drafts";

pub fn check_job_name(value: &Value, _row: &Row) -> anyhow::Result<()> {
    let name = value.as_str().unwrap_or_default();
    if name.chars().any(char::is_whitespace) {
        bail!("job name must not contain whitespace: {name:?}");
    }
    Ok(())
}

pub fn check_task_group(value: &Value, row: &Row) -> anyhow::Result<()> {
    let group = value.as_str().unwrap_or_default();
    if !group.is_empty() && !TASK_GROUPS.contains(&group) {
        let job = row.get("jobName").and_then(Value::as_str).unwrap_or("-");
        bail!("unknown task group {group:?} for job {job}");
    }
    Ok(())
}

pub fn job_draft_schema() -> ColumnSchema {
    let group_options = TASK_GROUPS
        .iter()
        .map(|group| SelectOption::new(*group, *group))
        .collect();
    let active_options = ACTIVE_STATUS_LABELS
        .iter()
        .map(|(code, label)| SelectOption::new(*label, *code))
        .collect();

    ColumnSchema::new(vec![
        Column::text("jobName", "Task Name")
            .with_width(200)
            .on_edit(check_job_name),
        Column::select("taskGroup", "Task Group", group_options)
            .with_width(200)
            .on_edit(check_task_group),
        Column::text("taskDescription", "Description").with_width(260),
        Column::select("activeStatus", "Active", active_options).with_width(120),
    ])
}

/// Scratch grid for planning new jobs. Rows live only in memory.
#[component]
pub fn JobDraftsPage(mut status: Signal<String>) -> Element {
    let services = use_context::<AppServices>();
    let remote = RemoteGrid::new(|| {
        let mut first = job_draft_schema().empty_row();
        first.insert(
            "activeStatus".to_string(),
            Value::from(ActiveStatus::Active.code()),
        );
        GridModel::new(
            job_draft_schema(),
            PageKey::from(JOB_DRAFTS_PAGE_KEY),
            RowOwnership::Owned,
            false,
        )
        .with_rows(vec![first])
    });

    let visibility_for_mount = services.visibility.clone();
    use_effect(move || load_visibility(remote, visibility_for_mount.clone()));

    let visibility_for_save = services.visibility.clone();

    rsx! {
        DataGrid {
            grid: remote.grid,
            panel: services.panel_settings(),
            on_search: move |criteria: Criteria| {
                let matched = remote.grid.read().visible_row_indices().len();
                tracing::debug!(criteria = criteria.len(), matched, "draft search");
                status.set(format!("符合 {matched} 筆"));
            },
            on_load_more: move |_: ()| {},
            on_visibility_save: move |update: VisibilityUpdate| {
                persist_visibility(remote, visibility_for_save.clone(), update)
            },
            on_action: move |_row: Row| {},
        }
    }
}
