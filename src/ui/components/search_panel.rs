use dioxus::prelude::*;

use crate::domain::entities::column::{Column, ColumnKind, SearchKind};
use crate::domain::entities::page::PageKey;
use crate::domain::entities::search::{Criteria, DateEdge, SearchValue};
use crate::ui::state::app_state::PanelSettings;
use crate::usecase::grid::GridModel;
use crate::usecase::resize::{InputCapture, ResizablePanelController};

/// Pointer capture for the resize handle. The full-window overlay that
/// receives move/up events is rendered only while a guard is alive.
pub struct OverlayCapture {
    page_key: PageKey,
}

pub struct OverlayGuard {
    page_key: PageKey,
}

impl InputCapture for OverlayCapture {
    type Guard = OverlayGuard;

    fn acquire(&mut self) -> OverlayGuard {
        tracing::debug!(page_key = %self.page_key, "resize capture acquired");
        OverlayGuard {
            page_key: self.page_key.clone(),
        }
    }
}

impl Drop for OverlayGuard {
    fn drop(&mut self) {
        tracing::debug!(page_key = %self.page_key, "resize capture released");
    }
}

const INPUT_STYLE: &str =
    "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; min-width: 140px;";
const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;";

#[component]
pub fn SearchPanel(
    mut grid: Signal<GridModel>,
    panel: PanelSettings,
    on_search: EventHandler<Criteria>,
) -> Element {
    let mut collapsed = use_signal(|| false);
    let mut resize = use_signal(|| {
        let page_key = grid.peek().visibility.page_key().clone();
        ResizablePanelController::new(
            panel.initial_height,
            panel.bounds,
            OverlayCapture { page_key },
        )
    });

    let model = grid.read();
    let fields: Vec<Column> = model
        .schema()
        .searchable()
        .filter(|column| !model.visibility.is_disabled(&column.id))
        .cloned()
        .collect();
    drop(model);

    let height = resize.read().height();
    let dragging = resize.read().is_dragging();
    let toggle_label = if collapsed() { "▸ 搜尋條件" } else { "▾ 搜尋條件" };

    rsx! {
        div {
            style: "border: 1px solid #ddd; border-radius: 8px; background: #fafafa; margin-bottom: 8px;",
            div {
                style: "display: flex; align-items: center; gap: 8px; padding: 6px 10px;",
                button {
                    style: "border: none; background: transparent; cursor: pointer; font-weight: 600;",
                    onclick: move |_| collapsed.toggle(),
                    "{toggle_label}"
                }
                div { style: "flex: 1;" }
                button {
                    style: "{BUTTON_STYLE}",
                    onclick: move |_| {
                        let criteria = grid.read().build_criteria();
                        on_search.call(criteria);
                    },
                    "搜尋"
                }
                button {
                    style: "{BUTTON_STYLE}",
                    onclick: move |_| grid.write().clear(),
                    "清除"
                }
                button {
                    style: "{BUTTON_STYLE}",
                    onclick: move |_| grid.write().visibility.open_dialog(),
                    "欄位設定"
                }
            }

            if !collapsed() {
                div {
                    style: "height: {height}px; overflow-y: auto; padding: 6px 10px; display: flex; flex-wrap: wrap; gap: 10px; align-content: flex-start;",
                    if fields.is_empty() {
                        span { style: "color: #888;", "沒有可用的搜尋欄位" }
                    }
                    for column in fields {
                        SearchField { key: "{column.id}", grid, column: column.clone() }
                    }
                }
                div {
                    style: "height: 6px; cursor: ns-resize; background: #e4e4e4; border-radius: 0 0 8px 8px;",
                    onmousedown: move |event| {
                        event.prevent_default();
                        resize.write().pointer_down(event.client_coordinates().y);
                    },
                }
            }
        }

        if dragging {
            div {
                style: "position: fixed; inset: 0; cursor: ns-resize; z-index: 1300;",
                onmousemove: move |event| {
                    resize.write().pointer_move(event.client_coordinates().y);
                },
                onmouseup: move |_| resize.write().pointer_up(),
                onmouseleave: move |_| resize.write().pointer_up(),
            }
        }
    }
}

#[component]
fn SearchField(mut grid: Signal<GridModel>, column: Column) -> Element {
    let current = grid.read().criteria.get(&column.id).cloned();
    let id = column.id.clone();
    let label = column.label.clone();

    let input = match (column.search_kind(), column.kind) {
        (Some(SearchKind::Text), ColumnKind::Select) => {
            let selected = match current {
                Some(SearchValue::Text(text)) => text,
                _ => String::new(),
            };
            rsx! {
                select {
                    style: "{INPUT_STYLE}",
                    value: "{selected}",
                    onchange: move |event| {
                        grid.write().criteria.set_text(&id, &event.value());
                    },
                    option { value: "", "(全部)" }
                    for opt in column.select_options.iter() {
                        option {
                            value: "{opt.value}",
                            selected: opt.value == selected,
                            "{opt.label}"
                        }
                    }
                }
            }
        }
        (Some(SearchKind::Text), _) => {
            let text = match current {
                Some(SearchValue::Text(text)) => text,
                _ => String::new(),
            };
            let uppercase = column.uppercase_input;
            rsx! {
                input {
                    style: "{INPUT_STYLE}",
                    value: "{text}",
                    oninput: move |event| {
                        let mut value = event.value();
                        if uppercase {
                            value = value.to_uppercase();
                        }
                        grid.write().criteria.set_text(&id, &value);
                    }
                }
            }
        }
        (Some(SearchKind::Number), _) => {
            let raw = match current {
                Some(SearchValue::Number { value }) => value,
                _ => String::new(),
            };
            rsx! {
                input {
                    style: "{INPUT_STYLE}",
                    value: "{raw}",
                    oninput: move |event| {
                        grid.write().criteria.set_number(&id, &event.value());
                    }
                }
            }
        }
        (Some(SearchKind::DateRange), _) => {
            let (from, to) = match current {
                Some(SearchValue::DateRange { from, to }) => {
                    (from.unwrap_or_default(), to.unwrap_or_default())
                }
                _ => (String::new(), String::new()),
            };
            let input_type = if column.kind == ColumnKind::DateTime {
                "datetime-local"
            } else {
                "date"
            };
            let id_to = id.clone();
            rsx! {
                div {
                    style: "display: inline-flex; align-items: center; gap: 4px;",
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "{input_type}",
                        value: "{from}",
                        oninput: move |event| {
                            grid.write().criteria.set_date_range(&id, DateEdge::From, &event.value());
                        }
                    }
                    span { "~" }
                    input {
                        style: "{INPUT_STYLE}",
                        r#type: "{input_type}",
                        value: "{to}",
                        oninput: move |event| {
                            grid.write().criteria.set_date_range(&id_to, DateEdge::To, &event.value());
                        }
                    }
                }
            }
        }
        (Some(SearchKind::Boolean), _) => {
            let selected = match current {
                Some(SearchValue::Boolean(Some(true))) => "true",
                Some(SearchValue::Boolean(Some(false))) => "false",
                _ => "",
            };
            rsx! {
                select {
                    style: "{INPUT_STYLE}",
                    value: "{selected}",
                    onchange: move |event| {
                        let value = match event.value().as_str() {
                            "true" => Some(true),
                            "false" => Some(false),
                            _ => None,
                        };
                        grid.write().criteria.set_boolean(&id, value);
                    },
                    option { value: "", selected: selected.is_empty(), "(不限)" }
                    option { value: "true", selected: selected == "true", "是" }
                    option { value: "false", selected: selected == "false", "否" }
                }
            }
        }
        (None, _) => return rsx! {},
    };

    rsx! {
        label {
            style: "display: inline-flex; flex-direction: column; gap: 2px; font-size: 13px;",
            span { style: "color: #555;", "{label}" }
            {input}
        }
    }
}
