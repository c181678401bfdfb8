use std::sync::Arc;

mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::app::App;
use crate::config::{default_webview_data_dir, load_app_config};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::seed::seed_demo_data;
use crate::ui::state::app_state::AppServices;
use crate::usecase::ports::repo::GridRepository;

fn main() {
    let (config, config_error) = load_app_config();
    if let Err(err) = logging::init(&config.log_file_path) {
        eprintln!("logging disabled: {err}");
    }
    if let Some(err) = config_error {
        tracing::warn!("using default settings: {err}");
    }
    tracing::info!(db_path = %config.db_path.display(), page_size = config.page_size, "starting");

    let repo: Arc<dyn GridRepository> = Arc::new(SqliteRepo::new(config.db_path.clone()));
    if let Err(err) = seed_demo_data(repo.as_ref()) {
        tracing::error!("database setup failed: {err}");
    }

    let mut desktop_config = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Grid Console"));
    match default_webview_data_dir() {
        Ok(dir) => desktop_config = desktop_config.with_data_directory(dir),
        Err(err) => tracing::warn!("webview data dir unavailable: {err:#}"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(AppServices::new(repo, config))
        .launch(App);
}
