//! Application setup
//!
//! Resolves where remembered settings live and wires the controller
//! together with the markup view and the file-backed store.

use crate::config::{APP_DIR_NAME, DATA_DIR_ENV, STORAGE_FILE_NAME};
use crate::controller::AppController;
use crate::database::Latency;
use crate::error::{AppError, Result};
use crate::storage::FileStore;
use crate::ui::MarkupUi;
use std::path::{Path, PathBuf};

pub type App = AppController<MarkupUi, FileStore>;

/// Data directory: `$DBCONSOLE_DATA_DIR`, else the platform data dir
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::Storage("Failed to determine data directory".to_string()))
}

/// Application setup - called once on startup
pub fn setup(data_dir: &Path, latency: Latency) -> Result<App> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", data_dir);

    std::fs::create_dir_all(data_dir)?;

    let store = FileStore::new(data_dir.join(STORAGE_FILE_NAME));
    let controller = AppController::new(MarkupUi::new(), store, latency);

    tracing::info!("Application initialized successfully");

    Ok(controller)
}
