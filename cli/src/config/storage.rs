use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::PathBuf;

const APP_DIR: &str = "themectl";
const PREFERENCES_FILE: &str = "preferences.json";

/// Where the preference document lives
#[derive(Debug, Default, Deserialize, Clone)]
pub struct StorageConfig {
    /// Explicit path of the JSON preference document
    /// (default: `<platform config dir>/themectl/preferences.json`)
    path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        dirs::config_dir()
            .map(|mut path| {
                path.push(APP_DIR);
                path.push(PREFERENCES_FILE);
                path
            })
            .ok_or_else(|| {
                AppError::Config(
                    "Unable to determine config directory, set storage.path".to_string(),
                )
            })
    }
}
