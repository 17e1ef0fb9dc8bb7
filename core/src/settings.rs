//! Tunable timings, tint shade and snow parameters, deserialized from the
//! host's configuration.

use serde::Deserialize;
use std::time::Duration;

/// Tunables of the theme manager and the seasonal effects.
///
/// Every field is optional so a partial `[theme]` table in the host's config
/// file is enough; getters supply the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeSettings {
    /// Delay between init and the first tint update, letting a splash surface
    /// finish its own transition (default: 600ms)
    splash_delay_ms: Option<u64>,
    /// Delay before the year-transition celebration starts (default: 3200ms)
    celebration_delay_ms: Option<u64>,
    /// Total length of the celebration (default: 10s)
    celebration_duration_ms: Option<u64>,
    /// Time between two celebration bursts (default: 350ms)
    celebration_interval_ms: Option<u64>,
    /// Shade applied to the base color for the light status bar (default: -12)
    status_bar_shade_percent: Option<i32>,
    /// Style property holding the base toolbar color
    base_color_property: Option<String>,
    #[serde(default)]
    snow: SnowSettings,
}

impl ThemeSettings {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms.unwrap_or(600))
    }

    pub fn celebration_delay(&self) -> Duration {
        Duration::from_millis(self.celebration_delay_ms.unwrap_or(3_200))
    }

    pub fn celebration_duration(&self) -> Duration {
        Duration::from_millis(self.celebration_duration_ms.unwrap_or(10_000))
    }

    pub fn celebration_interval(&self) -> Duration {
        Duration::from_millis(self.celebration_interval_ms.unwrap_or(350))
    }

    pub fn status_bar_shade_percent(&self) -> i32 {
        self.status_bar_shade_percent.unwrap_or(-12)
    }

    pub fn base_color_property(&self) -> &str {
        self.base_color_property
            .as_deref()
            .unwrap_or("--ion-toolbar-background")
    }

    pub fn snow(&self) -> &SnowSettings {
        &self.snow
    }

    pub fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay_ms = Some(delay.as_millis() as u64);
        self
    }

    pub fn with_celebration_delay(mut self, delay: Duration) -> Self {
        self.celebration_delay_ms = Some(delay.as_millis() as u64);
        self
    }
}

/// Snowfall parameters handed verbatim to the effect renderer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowSettings {
    dark_color: Option<String>,
    light_color: Option<String>,
    count: Option<u32>,
    min_opacity: Option<f32>,
    max_opacity: Option<f32>,
    min_size: Option<u32>,
    max_size: Option<u32>,
    rotation: Option<bool>,
    speed: Option<f32>,
    wind: Option<bool>,
}

impl SnowSettings {
    /// Resolve the renderer configuration for the active theme.
    pub fn for_theme(&self, dark: bool) -> SnowConfig {
        let color = if dark {
            self.dark_color.as_deref().unwrap_or("#fff")
        } else {
            self.light_color.as_deref().unwrap_or("#5ECDEF")
        };

        SnowConfig {
            color: color.to_string(),
            count: self.count.unwrap_or(14),
            min_opacity: self.min_opacity.unwrap_or(0.1),
            max_opacity: self.max_opacity.unwrap_or(0.95),
            min_size: self.min_size.unwrap_or(8),
            max_size: self.max_size.unwrap_or(15),
            rotation: self.rotation.unwrap_or(true),
            speed: self.speed.unwrap_or(1.0),
            wind: self.wind.unwrap_or(false),
        }
    }
}

/// Resolved snowfall configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowConfig {
    pub color: String,
    pub count: u32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub min_size: u32,
    pub max_size: u32,
    pub rotation: bool,
    pub speed: f32,
    pub wind: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ThemeSettings::default();
        assert_eq!(settings.splash_delay(), Duration::from_millis(600));
        assert_eq!(settings.celebration_delay(), Duration::from_millis(3_200));
        assert_eq!(settings.celebration_duration(), Duration::from_secs(10));
        assert_eq!(settings.celebration_interval(), Duration::from_millis(350));
        assert_eq!(settings.status_bar_shade_percent(), -12);
        assert_eq!(settings.base_color_property(), "--ion-toolbar-background");
    }

    #[test]
    fn test_snow_palette_per_theme() {
        let snow = SnowSettings::default();
        assert_eq!(snow.for_theme(true).color, "#fff");
        assert_eq!(snow.for_theme(false).color, "#5ECDEF");
        assert_eq!(snow.for_theme(false).count, 14);
        assert!(!snow.for_theme(true).wind);
    }

    #[test]
    fn test_partial_table_deserializes() {
        let settings: ThemeSettings = serde_json::from_value(serde_json::json!({
            "splash_delay_ms": 0,
            "snow": { "count": 40 }
        }))
        .unwrap();

        assert_eq!(settings.splash_delay(), Duration::ZERO);
        assert_eq!(settings.snow().for_theme(true).count, 40);
        assert_eq!(settings.status_bar_shade_percent(), -12);
    }
}
