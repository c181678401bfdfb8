use dioxus::prelude::*;

use crate::ui::pages::job_drafts::JobDraftsPage;
use crate::ui::pages::jobs::JobManagementPage;
use crate::ui::pages::watchlist::WatchlistPage;
use crate::ui::state::app_state::{AppState, PageTab};

fn tab_style(active: bool) -> &'static str {
    if active {
        "border: none; border-bottom: 3px solid #1976d2; background: transparent; padding: 8px 16px; cursor: pointer; font-weight: 600; color: #1976d2;"
    } else {
        "border: none; border-bottom: 3px solid transparent; background: transparent; padding: 8px 16px; cursor: pointer; color: #444;"
    }
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut active_tab,
        status,
    } = AppState::new();

    let current = active_tab();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px 16px; display: flex; flex-direction: column; gap: 10px; height: 100vh; box-sizing: border-box;",
            div {
                style: "display: flex; gap: 4px; border-bottom: 1px solid #ddd;",
                for tab in PageTab::ALL {
                    button {
                        key: "{tab.label()}",
                        style: "{tab_style(tab == current)}",
                        onclick: move |_| active_tab.set(tab),
                        "{tab.label()}"
                    }
                }
            }

            div {
                style: "flex: 1; min-height: 0;",
                match current {
                    PageTab::Jobs => rsx! { JobManagementPage { status } },
                    PageTab::JobDrafts => rsx! { JobDraftsPage { status } },
                    PageTab::Watchlist => rsx! { WatchlistPage {} },
                }
            }

            div {
                style: "font-size: 12px; color: #666; border-top: 1px solid #eee; padding-top: 4px;",
                "{status}"
            }
        }
    }
}
