use super::validation::{ConfigValidationError, MAX_SHADE_PERCENT, MIN_SHADE_PERCENT};
use super::{LoggingConfig, storage::StorageConfig, surface::SurfaceConfig};
use serde::Deserialize;
use std::time::Duration;
use theme::color::Rgb;
use theme::settings::ThemeSettings;

/// Main application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeSettings,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    surface: SurfaceConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let shade = self.theme.status_bar_shade_percent();
        if !(MIN_SHADE_PERCENT..=MAX_SHADE_PERCENT).contains(&shade) {
            errors.push(ConfigValidationError::ShadePercent {
                configured: shade,
                min_limit: MIN_SHADE_PERCENT,
                max_limit: MAX_SHADE_PERCENT,
            });
        }

        let timers = [
            ("theme.celebration_duration_ms", self.theme.celebration_duration()),
            ("theme.celebration_interval_ms", self.theme.celebration_interval()),
        ];
        for (field, value) in timers {
            if value == Duration::ZERO {
                errors.push(ConfigValidationError::ZeroDuration { field });
            }
        }

        if self.surface.toolbar_color().parse::<Rgb>().is_err() {
            errors.push(ConfigValidationError::Color {
                field: "surface.toolbar_color",
                value: self.surface.toolbar_color().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn parse(source: &str) -> AppConfig {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");

        assert_ok!(config.validate());
        assert_eq!(config.theme().splash_delay(), Duration::from_millis(600));
        assert_eq!(config.logging().level(), "info");
        assert!(config.surface().supports_status_bar());
    }

    #[test]
    fn test_sections_are_read() {
        let config = parse(
            r##"
            [theme]
            splash_delay_ms = 50
            status_bar_shade_percent = -20

            [theme.snow]
            count = 30

            [logging]
            level = "debug"

            [surface]
            prefers_dark = true
            toolbar_color = "#ffffff"
            "##,
        );

        assert_ok!(config.validate());
        assert_eq!(config.theme().splash_delay(), Duration::from_millis(50));
        assert_eq!(config.theme().status_bar_shade_percent(), -20);
        assert_eq!(config.theme().snow().for_theme(true).count, 30);
        assert_eq!(config.logging().level(), "debug");
        assert!(config.surface().prefers_dark());
    }

    #[test]
    fn test_out_of_range_values_are_all_reported() {
        let config = parse(
            r##"
            [theme]
            status_bar_shade_percent = -150
            celebration_interval_ms = 0

            [surface]
            toolbar_color = "white"
            "##,
        );

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_matches!(
            &errors[0],
            ConfigValidationError::ShadePercent {
                configured: -150,
                ..
            }
        );
        assert_matches!(
            &errors[1],
            ConfigValidationError::ZeroDuration {
                field: "theme.celebration_interval_ms"
            }
        );
        assert!(errors[2].user_message().contains("'white'"));
    }
}
