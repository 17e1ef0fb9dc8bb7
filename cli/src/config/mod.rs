use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub mod app;
pub mod storage;
pub mod surface;
pub mod validation;

pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `THEMECTL_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "THEMECTL";

static CONFIG: OnceLock<ConfigLoadResult> = OnceLock::new();

/// Load and validate the configuration.
///
/// An explicitly named file must exist; the default `config.toml` is
/// optional. Environment variables override file values.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let file_source = match path {
        Some(path) => File::from(path.to_path_buf()).required(true),
        None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
    };
    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config file and environment variables."
            ));
        }
    };

    let app_config = match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(e) => {
            return ConfigLoadResult::DeserializeError(format!(
                "Failed to deserialize config: {e}"
            ));
        }
    };

    match app_config.validate() {
        Ok(()) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(errors) => ConfigLoadResult::ValidationError(errors),
    }
}

/// Load the configuration once per process. Later calls return the first
/// result regardless of `path`.
pub fn init_config(path: Option<&Path>) -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config(path))
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    /// Log file; logs go to stderr when unset.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
