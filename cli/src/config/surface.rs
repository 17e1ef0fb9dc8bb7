use serde::Deserialize;

/// What the console stands in for: the OS dark-mode signal, whether the
/// device has a tintable status bar, and the theme's toolbar color.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct SurfaceConfig {
    prefers_dark: Option<bool>,
    supports_status_bar: Option<bool>,
    toolbar_color: Option<String>,
}

impl SurfaceConfig {
    pub fn prefers_dark(&self) -> bool {
        self.prefers_dark.unwrap_or(false)
    }

    pub fn supports_status_bar(&self) -> bool {
        self.supports_status_bar.unwrap_or(true)
    }

    /// Base toolbar color exposed under the theme's base color property
    /// (default: `#f7f7f7`)
    pub fn toolbar_color(&self) -> &str {
        self.toolbar_color.as_deref().unwrap_or("#f7f7f7")
    }
}
