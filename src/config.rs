//! Application settings: built-in defaults overlaid by an optional TOML file.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::usecase::resize::{DEFAULT_MAX_HEIGHT, DEFAULT_MIN_HEIGHT};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_PANEL_HEIGHT: f64 = 160.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

/// Layout of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub panel_min_height: Option<f64>,
    #[serde(default)]
    pub panel_max_height: Option<f64>,
    #[serde(default)]
    pub panel_initial_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_file_path: PathBuf,
    pub page_size: u32,
    pub panel_min_height: f64,
    pub panel_max_height: f64,
    pub panel_initial_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path().unwrap_or_else(|_| PathBuf::from("grid-console.sqlite")),
            log_file_path: default_log_path()
                .unwrap_or_else(|_| PathBuf::from("grid-console.log")),
            page_size: DEFAULT_PAGE_SIZE,
            panel_min_height: DEFAULT_MIN_HEIGHT,
            panel_max_height: DEFAULT_MAX_HEIGHT,
            panel_initial_height: DEFAULT_PANEL_HEIGHT,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "gridconsole", "grid-console")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("grid-console.sqlite"))
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("logs").join("grid-console.log"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// Returns `Ok(None)` when the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

pub fn merge_config(config_file: Option<ConfigFile>) -> AppConfig {
    let defaults = AppConfig::default();
    let Some(file) = config_file else {
        return defaults;
    };

    let panel_min_height = file.panel_min_height.unwrap_or(defaults.panel_min_height);
    let panel_max_height = file.panel_max_height.unwrap_or(defaults.panel_max_height);
    AppConfig {
        db_path: file.db_path.unwrap_or(defaults.db_path),
        log_file_path: file.log_file_path.unwrap_or(defaults.log_file_path),
        page_size: file.page_size.unwrap_or(defaults.page_size).max(1),
        panel_min_height,
        panel_max_height,
        panel_initial_height: file
            .panel_initial_height
            .unwrap_or(defaults.panel_initial_height),
    }
}

/// Loads `config.toml` from the platform config directory. A broken file is
/// reported next to the defaults instead of aborting startup.
pub fn load_app_config() -> (AppConfig, Option<ConfigError>) {
    let Ok(path) = default_config_path() else {
        return (AppConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(file) => (merge_config(file), None),
        Err(err) => (AppConfig::default(), Some(err)),
    }
}
