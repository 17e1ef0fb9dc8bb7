use theme::ThemeError;

/// Errors surfaced by the command line host.
///
/// Core failures are wrapped unchanged so their messages reach the user as
/// the library wrote them.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded, parsed or validated.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// A theme operation failed.
    #[error("Theme Error: {0}")]
    Theme(#[from] ThemeError),
}

impl From<theme::error::ColorError> for AppError {
    fn from(err: theme::error::ColorError) -> Self {
        AppError::Theme(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use theme::error::{ColorError, PreferenceError};

    #[test]
    fn test_messages_are_prefixed_by_category() {
        let err = AppError::Config("missing storage path".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration Error: missing storage path"
        );

        let err = AppError::from(ThemeError::from(PreferenceError::Write {
            key: "theme".to_string(),
            reason: "disk full".to_string(),
        }));
        assert!(err.to_string().starts_with("Theme Error: "));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_color_errors_convert_through_theme_error() {
        let err = AppError::from(ColorError::InvalidLength {
            input: "#fff".to_string(),
        });
        assert!(matches!(err, AppError::Theme(ThemeError::Color(_))));
    }
}
