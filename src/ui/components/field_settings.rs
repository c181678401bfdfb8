use dioxus::prelude::*;

use crate::domain::entities::column::Column;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::usecase::grid::GridModel;

/// Dialog editing which search fields are shown. Works on the draft until
/// Save; Save commits at once and hands the update to `on_save` for
/// persisting.
#[component]
pub fn FieldSettingsDialog(
    mut grid: Signal<GridModel>,
    on_save: EventHandler<VisibilityUpdate>,
) -> Element {
    let model = grid.read();
    let Some(draft) = model.visibility.draft().cloned() else {
        return rsx! {};
    };
    let columns: Vec<Column> = model.schema().searchable().cloned().collect();
    drop(model);

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;",
            onclick: move |_| grid.write().visibility.cancel(),
            div {
                style: "background: #fff; border-radius: 10px; padding: 16px 20px; min-width: 320px; box-shadow: 0 10px 24px rgba(0,0,0,0.2);",
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin: 0 0 12px 0;", "搜尋欄位設定" }
                for column in columns {
                    {
                        let id = column.id.clone();
                        let shown = !draft.contains(&column.id);
                        rsx! {
                            label {
                                key: "{column.id}",
                                style: "display: flex; align-items: center; gap: 8px; padding: 4px 0;",
                                input {
                                    r#type: "checkbox",
                                    checked: shown,
                                    onclick: move |_| grid.write().visibility.toggle_draft(&id),
                                }
                                "{column.label}"
                            }
                        }
                    }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                    button {
                        style: "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| grid.write().visibility.cancel(),
                        "取消"
                    }
                    button {
                        style: "border: 1px solid #1976d2; background: #1976d2; color: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            let update = grid.write().visibility.save();
                            if let Some(update) = update {
                                on_save.call(update);
                            }
                        },
                        "儲存"
                    }
                }
            }
        }
    }
}
