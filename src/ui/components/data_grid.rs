use dioxus::prelude::*;
use serde_json::Value;

use crate::domain::entities::column::{Column, ColumnKind};
use crate::domain::entities::row::{cell, cell_text, Row};
use crate::domain::entities::search::Criteria;
use crate::domain::entities::sort::SortDirection;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::ui::components::field_settings::FieldSettingsDialog;
use crate::ui::components::search_panel::SearchPanel;
use crate::ui::state::app_state::PanelSettings;
use crate::usecase::format::format_cell;
use crate::usecase::grid::{GridModel, RowOwnership};

/// Distance from the bottom of the scroll area at which the last row counts
/// as visible.
const LOAD_MORE_THRESHOLD_PX: f64 = 24.0;

fn table_container_style() -> &'static str {
    "max-height: 460px; overflow: auto; border: 1px solid #ddd; border-radius: 8px;"
}

fn table_header_cell_style(sortable: bool, width: Option<u32>) -> String {
    let cursor = if sortable { "pointer" } else { "default" };
    let width = width.map(|w| format!(" width: {w}px;")).unwrap_or_default();
    format!(
        "position: sticky; top: 0; background: #f3f6fb; border-bottom: 2px solid #1976d2; padding: 6px 8px; text-align: left; cursor: {cursor}; user-select: none;{width}"
    )
}

fn cell_alignment(column: &Column) -> &'static str {
    match column.kind {
        ColumnKind::Number => "right",
        ColumnKind::Action | ColumnKind::Boolean => "center",
        _ => "left",
    }
}

#[component]
pub fn DataGrid(
    mut grid: Signal<GridModel>,
    panel: PanelSettings,
    on_search: EventHandler<Criteria>,
    on_load_more: EventHandler<()>,
    on_visibility_save: EventHandler<VisibilityUpdate>,
    on_action: EventHandler<Row>,
) -> Element {
    let model = grid.read();
    let columns: Vec<Column> = model.schema().iter().cloned().collect();
    let visible_rows: Vec<(usize, Row)> = model
        .visible_row_indices()
        .into_iter()
        .filter_map(|idx| model.row(idx).map(|row| (idx, row.clone())))
        .collect();
    let sort_state = model.sort.state().clone();
    let pagination = model.pagination.state();
    let infinite_scroll = model.pagination.is_enabled();
    let owned = *model.ownership() == RowOwnership::Owned;
    let error = model.error().map(str::to_string);
    let persist_error = model.visibility.last_error().map(str::to_string);
    let loaded_rows = model.rows().len();
    drop(model);

    let column_count = columns.len().max(1);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; min-width: 0;",

            if let Some(err) = error {
                div {
                    style: "background: #fdecea; color: #611a15; border: 1px solid #f5c6cb; border-radius: 6px; padding: 8px 12px;",
                    "錯誤：{err}"
                }
            }

            if let Some(err) = persist_error {
                div {
                    style: "display: flex; align-items: center; gap: 12px; background: #fff4e5; color: #663c00; border: 1px solid #ffd8a8; border-radius: 6px; padding: 8px 12px;",
                    span { "欄位設定儲存失敗：{err}" }
                    button {
                        style: "border: 1px solid #bbb; background: #fff; padding: 2px 10px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            let update = grid.read().visibility.retry();
                            if let Some(update) = update {
                                on_visibility_save.call(update);
                            }
                        },
                        "重試"
                    }
                }
            }

            SearchPanel { grid, panel, on_search }
            FieldSettingsDialog { grid, on_save: on_visibility_save }

            div {
                style: "{table_container_style()}",
                onscroll: move |event| {
                    let data = event.data();
                    let bottom = data.scroll_top() as f64 + data.client_height() as f64;
                    let near_bottom = bottom >= data.scroll_height() as f64 - LOAD_MORE_THRESHOLD_PX;
                    if !grid.peek().pagination.observation_changes(loaded_rows, near_bottom) {
                        return;
                    }
                    let mut triggered = false;
                    grid.write()
                        .pagination
                        .observe_last_row(loaded_rows, near_bottom, || triggered = true);
                    if triggered {
                        on_load_more.call(());
                    }
                },
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            for column in columns.iter().cloned() {
                                {
                                    let sortable = column.is_sortable();
                                    let indicator = match (&sort_state.field, sort_state.direction) {
                                        (Some(field), SortDirection::Asc) if *field == column.id => " ▲",
                                        (Some(field), SortDirection::Desc) if *field == column.id => " ▼",
                                        _ => "",
                                    };
                                    let id = column.id.clone();
                                    rsx! {
                                        th {
                                            key: "{column.id}",
                                            style: "{table_header_cell_style(sortable, column.width)}",
                                            onclick: move |_| {
                                                if sortable {
                                                    grid.write().toggle_sort(&id);
                                                }
                                            },
                                            "{column.label}{indicator}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    tbody {
                        for (row_idx, row) in visible_rows {
                            tr {
                                key: "{row_idx}",
                                for column in columns.iter().cloned() {
                                    DataCell {
                                        key: "{column.id}",
                                        grid,
                                        column,
                                        row_idx,
                                        row: row.clone(),
                                        owned,
                                        on_action,
                                    }
                                }
                            }
                        }

                        if infinite_scroll && pagination.has_more {
                            tr {
                                td {
                                    colspan: "{column_count}",
                                    style: "text-align: center; padding: 12px; color: #666;",
                                    if pagination.is_loading {
                                        "載入中..."
                                    } else {
                                        span {
                                            style: "cursor: pointer;",
                                            onclick: move |_| {
                                                if grid.read().pagination.can_load_more() {
                                                    on_load_more.call(());
                                                }
                                            },
                                            "滾動加載更多"
                                        }
                                    }
                                }
                            }
                        }

                        if owned {
                            tr {
                                td {
                                    colspan: "{column_count}",
                                    style: "text-align: center; padding: 10px;",
                                    button {
                                        style: "border: 1px solid #1976d2; color: #1976d2; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                                        onclick: move |_| {
                                            grid.write().add_row();
                                        },
                                        "＋ 新增列"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DataCell(
    mut grid: Signal<GridModel>,
    column: Column,
    row_idx: usize,
    row: Row,
    owned: bool,
    on_action: EventHandler<Row>,
) -> Element {
    let style = format!(
        "border-bottom: 1px solid #e0e0e0; padding: 4px 8px; text-align: {};",
        cell_alignment(&column)
    );

    if column.is_action_column {
        let label = column.label.clone();
        return rsx! {
            td { style: "{style}",
                button {
                    style: "border: 1px solid #1976d2; color: #1976d2; background: #fff; padding: 2px 10px; border-radius: 6px; cursor: pointer;",
                    title: "{label}",
                    onclick: move |_| on_action.call(row.clone()),
                    "▶"
                }
            }
        };
    }

    if owned {
        let id = column.id.clone();
        let current = cell(&row, &column.id)
            .and_then(cell_text)
            .unwrap_or_default();
        let mut on_change = move |value: String| {
            if let Err(err) = grid.write().set_cell_text(row_idx, &id, &value) {
                tracing::warn!(row = row_idx, column = %id, "cell edit rejected: {err}");
            }
        };
        if column.kind == ColumnKind::Select {
            return rsx! {
                td { style: "{style}",
                    select {
                        style: "width: 100%;",
                        value: "{current}",
                        onchange: move |event| on_change(event.value()),
                        option { value: "", "" }
                        for opt in column.select_options.iter() {
                            option {
                                value: "{opt.value}",
                                selected: opt.value == current,
                                "{opt.label}"
                            }
                        }
                    }
                }
            };
        }
        let input_type = match column.kind {
            ColumnKind::Number => "number",
            ColumnKind::Date => "date",
            ColumnKind::DateTime => "datetime-local",
            _ => "text",
        };
        return rsx! {
            td { style: "{style}",
                input {
                    style: "width: 100%;",
                    r#type: "{input_type}",
                    value: "{current}",
                    oninput: move |event| on_change(event.value()),
                }
            }
        };
    }

    let formatted = format_cell(&column, cell(&row, &column.id));
    let hint = column
        .hint_field
        .as_deref()
        .and_then(|field| row.get(field))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    rsx! {
        td { style: "{style}",
            if let Some(hint) = hint {
                span { title: "{hint}", style: "text-decoration: underline dotted;", "{formatted}" }
            } else {
                "{formatted}"
            }
        }
    }
}
