use thiserror::Error;

/// Failures reported by a [`PreferenceStore`](crate::storage::PreferenceStore).
///
/// A failed write is never swallowed: the next process start would silently
/// revert the preference. Callers of [`ThemeManager::init`] and
/// [`ThemeManager::toggle`] receive these wrapped in [`ThemeError::Persistence`].
///
/// [`ThemeManager::init`]: crate::manager::ThemeManager::init
/// [`ThemeManager::toggle`]: crate::manager::ThemeManager::toggle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// The store could not produce the value for `key`.
    #[error("Failed to read preference '{key}': {reason}")]
    Read { key: String, reason: String },

    /// The store could not durably write the value for `key`.
    #[error("Failed to write preference '{key}': {reason}")]
    Write { key: String, reason: String },

    /// The value for `key` could not be encoded or decoded.
    #[error("Failed to (de)serialize preference '{key}': {reason}")]
    Serialization { key: String, reason: String },
}

/// Malformed hex input handed to the color transform.
///
/// Always a caller contract violation; the transform fails fast instead of
/// degrading unparsed channels to zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color '{input}': expected '#' followed by six hex digits")]
    InvalidLength { input: String },

    #[error("Invalid hex color '{input}': {channel} channel is not hexadecimal")]
    InvalidChannel { input: String, channel: &'static str },
}

/// Failures raised by a particle effect implementation.
///
/// Neither variant ever reaches a caller of the theme manager: teardown and
/// start failures are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("Effect teardown failed: {0}")]
    Teardown(String),

    #[error("Effect start failed: {0}")]
    Start(String),
}

/// Top level error type of the theme subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Persistence(#[from] PreferenceError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("Invalid accent '{accent}': {reason}")]
    InvalidAccent { accent: String, reason: String },

    #[error("Theme manager already initialized")]
    AlreadyInitialized,
}

pub type ThemeResult<T> = Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_is_transparent() {
        let error: ThemeError = PreferenceError::Write {
            key: "theme".to_string(),
            reason: "disk full".to_string(),
        }
        .into();

        assert_eq!(
            error.to_string(),
            "Failed to write preference 'theme': disk full"
        );
    }

    #[test]
    fn test_color_error_names_channel() {
        let error = ColorError::InvalidChannel {
            input: "#zz0000".to_string(),
            channel: "red",
        };
        assert!(error.to_string().contains("red channel"));
    }
}
