//! Boundaries to the host: the rendering surface that carries theme markers
//! and the device chrome (status bar, navigation bar) that receives the tint.
//!
//! The core only computes what to send; implementations forward it to the
//! platform and never report back.

use crate::color::{Rgb, shade};
use crate::error::ColorError;

/// Navigation bar background while the dark theme is active.
pub const NAVIGATION_BAR_DARK: &str = "#000000";

/// Navigation bar background while the light theme is active.
pub const NAVIGATION_BAR_LIGHT: &str = "#f7f7f7";

/// Status bar content style forwarded with every status bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarStyle {
    /// Light glyphs, for dark backgrounds.
    Dark,
    /// Dark glyphs, for light backgrounds.
    Light,
}

/// The root display container of the host UI.
pub trait RenderSurface: Send + Sync {
    /// Add (`enabled == true`) or remove a class-like marker on the root
    /// container. Applying an already present marker is a no-op.
    fn toggle_marker(&self, marker: &str, enabled: bool);

    /// Current value of a theme-defined style property, if the theme defines it.
    fn property_value(&self, name: &str) -> Option<String>;

    /// Operating system dark-mode preference.
    fn prefers_dark_scheme(&self) -> bool;
}

/// Device chrome tint.
pub trait PlatformTint: Send + Sync {
    /// Whether this platform exposes a status bar tint API at all.
    fn supports_status_bar(&self) -> bool;

    fn set_status_bar_color(&self, color: &str, is_dark: bool, style: StatusBarStyle);

    fn set_navigation_bar_color(&self, is_dark: bool);
}

pub fn navigation_bar_color(is_dark: bool) -> &'static str {
    if is_dark {
        NAVIGATION_BAR_DARK
    } else {
        NAVIGATION_BAR_LIGHT
    }
}

/// Status bar color derived from the theme's base color: pure black for the
/// dark theme, the base color shaded by `shade_percent` otherwise.
///
/// # Errors
///
/// Returns [`ColorError`] when the light theme is active and `base_color` is not
/// a `#rrggbb` triplet. The base color is not inspected for the dark theme.
pub fn status_bar_tint(
    base_color: &str,
    is_dark: bool,
    shade_percent: i32,
) -> Result<String, ColorError> {
    if is_dark {
        Ok(Rgb::BLACK.to_hex())
    } else {
        shade(base_color, shade_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    #[test]
    fn test_dark_theme_forces_black() {
        assert_eq!(status_bar_tint("#f7f7f7", true, -12).unwrap(), "#000000");
        assert_eq!(status_bar_tint("not a color", true, -12).unwrap(), "#000000");
    }

    #[test]
    fn test_light_theme_darkens_base_color() {
        assert_eq!(status_bar_tint(" #f7f7f7", false, -12).unwrap(), "#d9d9d9");
        assert_err!(status_bar_tint("", false, -12));
    }

    #[test]
    fn test_navigation_bar_palette() {
        assert_eq!(navigation_bar_color(true), "#000000");
        assert_eq!(navigation_bar_color(false), "#f7f7f7");
    }
}
