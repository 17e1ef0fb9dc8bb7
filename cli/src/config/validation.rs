use super::app::AppConfig;

/// Bounds of `theme.status_bar_shade_percent`. Below -100 every channel is
/// already clamped to black.
pub const MIN_SHADE_PERCENT: i32 = -100;
pub const MAX_SHADE_PERCENT: i32 = 100;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid status_bar_shade_percent: {configured} (min: {min_limit}, max: {max_limit})")]
    ShadePercent {
        configured: i32,
        min_limit: i32,
        max_limit: i32,
    },
    #[error("Invalid {field}: must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("Invalid {field}: '{value}' is not a #rrggbb color")]
    Color { field: &'static str, value: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::ShadePercent {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Status bar shade out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update theme.status_bar_shade_percent in config.toml."
                )
            }
            ConfigValidationError::ZeroDuration { field } => {
                format!(
                    "Timer setting is zero!\n\n\
                    {field} drives a timer and must be at least 1.\n\n\
                    Please update {field} in config.toml or remove it to use the default."
                )
            }
            ConfigValidationError::Color { field, value } => {
                format!(
                    "Malformed color!\n\n\
                    Your configured value: '{value}'\n\
                    Expected format: #rrggbb\n\n\
                    Please update {field} in config.toml."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
    ValidationError(Vec<ConfigValidationError>),
}

impl ConfigLoadResult {
    /// Single message suitable for printing before exit.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ConfigLoadResult::Success(_) => None,
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => {
                Some(msg.clone())
            }
            ConfigLoadResult::ValidationError(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
                Some(format!(
                    "Configuration validation failed:\n{}",
                    messages.join("\n\n")
                ))
            }
        }
    }
}
