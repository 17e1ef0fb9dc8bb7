//! Console stand-ins for the host collaborators of the theme manager.
//!
//! A terminal has no stylesheet, device chrome or particle engine, so these
//! keep the marker set in memory and report chrome and effect calls through
//! the log.

use crate::config::surface::SurfaceConfig;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};
use theme::error::EffectError;
use theme::platform::{PlatformTint, RenderSurface, StatusBarStyle, navigation_bar_color};
use theme::seasonal::{ConfettiBurst, EffectHandle, EffectRenderer};
use theme::settings::SnowConfig;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marker set and style properties of the console "root container".
#[derive(Debug)]
pub struct ConsoleSurface {
    markers: Mutex<BTreeSet<String>>,
    properties: HashMap<String, String>,
    prefers_dark: bool,
}

impl ConsoleSurface {
    /// `base_color_property` is the property name the theme manager reads the
    /// toolbar color from.
    pub fn new(config: &SurfaceConfig, base_color_property: &str) -> Self {
        let properties = HashMap::from([(
            base_color_property.to_string(),
            config.toolbar_color().to_string(),
        )]);

        Self {
            markers: Mutex::new(BTreeSet::new()),
            properties,
            prefers_dark: config.prefers_dark(),
        }
    }

    /// Active markers in sorted order.
    pub fn markers(&self) -> Vec<String> {
        lock(&self.markers).iter().cloned().collect()
    }
}

impl RenderSurface for ConsoleSurface {
    fn toggle_marker(&self, marker: &str, enabled: bool) {
        let changed = {
            let mut markers = lock(&self.markers);
            if enabled {
                markers.insert(marker.to_string())
            } else {
                markers.remove(marker)
            }
        };

        if changed {
            log::debug!("Marker '{marker}' {}", if enabled { "added" } else { "removed" });
        }
    }

    fn property_value(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark
    }
}

/// Device chrome that only reports what it would have painted.
#[derive(Debug)]
pub struct LoggingTint {
    supports_status_bar: bool,
    last_status_bar: Mutex<Option<String>>,
}

impl LoggingTint {
    pub fn new(supports_status_bar: bool) -> Self {
        Self {
            supports_status_bar,
            last_status_bar: Mutex::new(None),
        }
    }

    /// Last status bar color forwarded, if any.
    pub fn last_status_bar(&self) -> Option<String> {
        lock(&self.last_status_bar).clone()
    }
}

impl PlatformTint for LoggingTint {
    fn supports_status_bar(&self) -> bool {
        self.supports_status_bar
    }

    fn set_status_bar_color(&self, color: &str, is_dark: bool, style: StatusBarStyle) {
        log::info!("Status bar -> {color} ({style:?} content, dark theme: {is_dark})");
        *lock(&self.last_status_bar) = Some(color.to_string());
    }

    fn set_navigation_bar_color(&self, is_dark: bool) {
        log::info!("Navigation bar -> {}", navigation_bar_color(is_dark));
    }
}

struct LoggedSnow {
    color: String,
}

impl EffectHandle for LoggedSnow {
    fn destroy(&mut self) -> Result<(), EffectError> {
        log::info!("Snowfall ({}) stopped", self.color);
        Ok(())
    }
}

/// Effect renderer that logs snowfall and confetti instead of drawing them.
#[derive(Debug, Default)]
pub struct LogEffectRenderer;

impl EffectRenderer for LogEffectRenderer {
    fn start_snow(&self, config: &SnowConfig) -> Result<Box<dyn EffectHandle>, EffectError> {
        log::info!(
            "Snowfall started: {} flakes of {}, size {}-{}, opacity {}-{}",
            config.count,
            config.color,
            config.min_size,
            config.max_size,
            config.min_opacity,
            config.max_opacity
        );
        Ok(Box::new(LoggedSnow {
            color: config.color.clone(),
        }))
    }

    fn confetti(&self, burst: &ConfettiBurst) {
        log::debug!(
            "Confetti: {:.1} particles from ({:.2}, {:.2})",
            burst.particle_count,
            burst.origin_x,
            burst.origin_y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    #[test]
    fn test_surface_exposes_toolbar_color_under_property() {
        let surface = ConsoleSurface::new(&SurfaceConfig::default(), "--toolbar");

        assert_eq!(surface.property_value("--toolbar").as_deref(), Some("#f7f7f7"));
        assert_none!(surface.property_value("--other"));
        assert!(!surface.prefers_dark_scheme());
    }

    #[test]
    fn test_surface_markers_are_a_set() {
        let surface = ConsoleSurface::new(&SurfaceConfig::default(), "--toolbar");

        surface.toggle_marker("dark", true);
        surface.toggle_marker("dark", true);
        surface.toggle_marker("gold", true);
        surface.toggle_marker("blue", false);
        assert_eq!(surface.markers(), vec!["dark", "gold"]);

        surface.toggle_marker("dark", false);
        assert_eq!(surface.markers(), vec!["gold"]);
    }

    #[test]
    fn test_tint_remembers_last_status_bar_color() {
        let tint = LoggingTint::new(true);
        assert_none!(tint.last_status_bar());

        tint.set_navigation_bar_color(true);
        tint.set_status_bar_color("#d9d9d9", false, StatusBarStyle::Dark);
        assert_eq!(tint.last_status_bar().as_deref(), Some("#d9d9d9"));
    }

    #[test]
    fn test_renderer_handles_destroy_cleanly() {
        let renderer = LogEffectRenderer;
        let config = theme::settings::SnowSettings::default().for_theme(false);

        let mut handle = renderer.start_snow(&config).unwrap();
        assert_ok!(handle.destroy());
    }
}
