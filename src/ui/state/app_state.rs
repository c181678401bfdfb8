use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::config::AppConfig;
use crate::domain::entities::search::Criteria;
use crate::usecase::grid::GridModel;
use crate::usecase::ports::repo::GridRepository;
use crate::usecase::resize::PanelBounds;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::visibility_service::VisibilityService;

/// Services shared by every page, handed to the UI as a root context.
#[derive(Clone)]
pub struct AppServices {
    pub query: Arc<QueryService>,
    pub visibility: Arc<VisibilityService>,
    pub config: AppConfig,
}

impl AppServices {
    pub fn new(repo: Arc<dyn GridRepository>, config: AppConfig) -> Self {
        Self {
            query: Arc::new(QueryService::new(repo.clone(), config.page_size)),
            visibility: Arc::new(VisibilityService::new(repo)),
            config,
        }
    }

    pub fn panel_settings(&self) -> PanelSettings {
        PanelSettings {
            bounds: PanelBounds::new(self.config.panel_min_height, self.config.panel_max_height),
            initial_height: self.config.panel_initial_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSettings {
    pub bounds: PanelBounds,
    pub initial_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTab {
    Jobs,
    JobDrafts,
    Watchlist,
}

impl PageTab {
    pub const ALL: [PageTab; 3] = [PageTab::Jobs, PageTab::JobDrafts, PageTab::Watchlist];

    pub fn label(self) -> &'static str {
        match self {
            PageTab::Jobs => "Job Management",
            PageTab::JobDrafts => "Job Drafts",
            PageTab::Watchlist => "Watchlist",
        }
    }
}

pub struct AppState {
    pub active_tab: Signal<PageTab>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: use_signal(|| PageTab::Jobs),
            status: use_signal(|| "就緒".to_string()),
        }
    }
}

/// Signals backing one server-paged grid: the model plus the criteria of the
/// last explicit search, reused when loading further pages.
#[derive(Clone, Copy, PartialEq)]
pub struct RemoteGrid {
    pub grid: Signal<GridModel>,
    pub last_criteria: Signal<Criteria>,
}

impl RemoteGrid {
    pub fn new(model: impl FnOnce() -> GridModel) -> Self {
        Self {
            grid: use_signal(model),
            last_criteria: use_signal(Criteria::new),
        }
    }
}
