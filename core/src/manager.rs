//! The theme state manager: persisted preference, surface markers and the
//! device chrome tint derived from them.

use crate::calendar::CalendarGate;
use crate::error::{PreferenceError, ThemeResult};
use crate::gate::InitGate;
use crate::model::{DARK_MARKER, InitPhase, Theme, ThemePreference};
use crate::platform::{PlatformTint, RenderSurface, StatusBarStyle, status_bar_tint};
use crate::seasonal::{EffectRenderer, SeasonalController};
use crate::settings::ThemeSettings;
use crate::storage::{PreferenceStore, THEME_KEY};
use crate::validation::{AccentValidator, Validator};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Owner of the user's theme preference and everything derived from it.
///
/// One instance is constructed per process, initialized once with
/// [`init`](Self::init) and then shared by reference (typically through an
/// `Arc`). All reads of theme state suspend until the persisted preference has
/// been loaded; reads issued before that are queued, not rejected.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use theme::ThemeManager;
///
/// let manager = Arc::new(ThemeManager::new(store, surface, tint, renderer));
/// manager.init(|| log::info!("splash can go")).await?;
///
/// if !manager.is_dark_themed().await {
///     manager.toggle(true, true, None).await?;
/// }
/// ```
pub struct ThemeManager {
    store: Arc<dyn PreferenceStore>,
    surface: Arc<dyn RenderSurface>,
    tint: Arc<dyn PlatformTint>,
    seasonal: SeasonalController,
    settings: ThemeSettings,
    gate: InitGate,
    state: RwLock<ThemePreference>,
    // Bumped by every explicit tint update so the delayed startup tint can
    // tell it has been superseded.
    tint_generation: AtomicU64,
}

impl ThemeManager {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        surface: Arc<dyn RenderSurface>,
        tint: Arc<dyn PlatformTint>,
        renderer: Arc<dyn EffectRenderer>,
    ) -> Self {
        let seasonal = SeasonalController::new(renderer, Arc::clone(&store), CalendarGate::system());
        Self {
            store,
            surface,
            tint,
            seasonal,
            settings: ThemeSettings::default(),
            gate: InitGate::new(),
            state: RwLock::new(ThemePreference::new(Theme::Light, "")),
            tint_generation: AtomicU64::new(0),
        }
    }

    /// Replace the calendar the seasonal effects are gated on.
    pub fn with_calendar(mut self, calendar: CalendarGate) -> Self {
        self.seasonal = self.seasonal.with_calendar(calendar);
        self
    }

    pub fn with_settings(mut self, settings: ThemeSettings) -> Self {
        self.seasonal = self.seasonal.with_settings(settings.clone());
        self.settings = settings;
        self
    }

    pub fn phase(&self) -> InitPhase {
        self.gate.phase()
    }

    /// Load the persisted preference (or fall back to the OS dark-mode signal),
    /// apply it to the rendering surface and open the read gate.
    ///
    /// After the configured splash delay the status/navigation bar tint is
    /// applied and `on_ready` is called. If the calendar is inside the year
    /// transition window a celebration is scheduled independently.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::AlreadyInitialized`] when called more than once
    /// - [`ThemeError::Persistence`] when the preference cannot be read; the
    ///   manager returns to `Uninitialized` and `init` may be retried
    ///
    /// Once the preference is loaded the manager is `Ready`. A failure to read
    /// the winter opt-in after that point is logged and the effect stays off.
    ///
    /// [`ThemeError::AlreadyInitialized`]: crate::error::ThemeError::AlreadyInitialized
    /// [`ThemeError::Persistence`]: crate::error::ThemeError::Persistence
    pub async fn init<F>(self: &Arc<Self>, on_ready: F) -> ThemeResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.gate.begin()?;

        let stored = match self.store.get_object(THEME_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                self.gate.abort();
                return Err(e.into());
            }
        };

        let preference = self.resolve_preference(stored);
        self.apply_markers(preference.theme.is_dark(), &preference.accent_color);
        *self.state.write().await = preference.clone();
        self.gate.open();
        log::info!(
            "Theme manager initialized: {} (accent: '{}')",
            preference.theme,
            preference.accent_color
        );

        self.schedule_startup_tint(on_ready);
        self.seasonal.schedule_celebration(self.settings.celebration_delay());

        if let Err(e) = self.refresh_winter().await {
            log::error!("Failed to start the winter effect: {e}");
        }
        Ok(())
    }

    fn resolve_preference(&self, stored: Option<serde_json::Value>) -> ThemePreference {
        let from_system = || {
            let dark = self.surface.prefers_dark_scheme();
            log::info!("No stored theme preference, following system (dark: {dark})");
            ThemePreference::new(Theme::from_dark(dark), "")
        };

        let Some(value) = stored else {
            return from_system();
        };

        match serde_json::from_value::<ThemePreference>(value) {
            Ok(mut preference) => {
                if let Err(e) = AccentValidator.validate(preference.accent_color.as_str()) {
                    log::warn!("Dropping stored accent: {e}");
                    preference.accent_color.clear();
                }
                preference
            }
            Err(e) => {
                log::warn!("Ignoring malformed theme preference: {e}");
                from_system()
            }
        }
    }

    fn schedule_startup_tint<F>(self: &Arc<Self>, on_ready: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.tint_generation.load(Ordering::SeqCst);
        let delay = self.settings.splash_delay();
        let manager = Arc::downgrade(self);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if let Some(manager) = manager.upgrade() {
                if manager.tint_generation.load(Ordering::SeqCst) == generation {
                    if let Err(e) = manager.update_tint().await {
                        log::error!("Failed to apply startup tint: {e}");
                    }
                } else {
                    log::debug!("Startup tint superseded by a later update");
                }
            }

            on_ready();
        });
    }

    /// Switch between dark and light, optionally with a new accent.
    ///
    /// `accent == None` keeps the current accent. A non-empty accent is applied
    /// as an additional marker next to the dark/light marker; the previous
    /// accent is NOT removed, callers that change accents follow up with
    /// [`undo_color`](Self::undo_color) for the old one.
    ///
    /// The preference is written through on every call. Two toggles started
    /// independently may interleave at that write and the last write wins;
    /// toggles come from user input and are serial in practice, so no locking
    /// is done here.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::InvalidAccent`] before anything is changed
    /// - [`ThemeError::Persistence`] when the write fails; the markers are
    ///   rolled back to their previous state first
    /// - [`ThemeError::Color`] when the tint cannot be derived from the
    ///   theme's base color; the new theme is already saved and the winter
    ///   effect recolored at that point
    ///
    /// [`ThemeError::InvalidAccent`]: crate::error::ThemeError::InvalidAccent
    /// [`ThemeError::Persistence`]: crate::error::ThemeError::Persistence
    /// [`ThemeError::Color`]: crate::error::ThemeError::Color
    pub async fn toggle(&self, dark: bool, update_tint: bool, accent: Option<&str>) -> ThemeResult<()> {
        self.gate.wait().await;

        let previous = self.state.read().await.clone();
        let accent = accent.map_or_else(|| previous.accent_color.clone(), str::to_string);
        AccentValidator.validate(accent.as_str())?;

        self.apply_markers(dark, &accent);

        let preference = ThemePreference::new(Theme::from_dark(dark), accent);
        if let Err(e) = self.persist(&preference).await {
            self.rollback_markers(&previous, &preference);
            return Err(e.into());
        }

        *self.state.write().await = preference.clone();
        log::info!(
            "Theme switched to {} (accent: '{}')",
            preference.theme,
            preference.accent_color
        );

        let tint = if update_tint {
            self.tint_generation.fetch_add(1, Ordering::SeqCst);
            self.update_tint().await
        } else {
            Ok(())
        };

        let winter = self.refresh_winter().await;
        tint.and(winter)
    }

    /// Remove an accent marker, the current accent when `accent` is `None`.
    /// Empty accents are ignored. The remembered accent is left untouched.
    pub async fn undo_color(&self, accent: Option<&str>) {
        self.gate.wait().await;

        let accent = match accent {
            Some(accent) => accent.to_string(),
            None => self.state.read().await.accent_color.clone(),
        };

        if !accent.is_empty() {
            self.surface.toggle_marker(&accent, false);
        }
    }

    pub async fn get_theme_color(&self) -> String {
        self.gate.wait().await;
        self.state.read().await.accent_color.clone()
    }

    pub async fn is_dark_themed(&self) -> bool {
        self.gate.wait().await;
        self.state.read().await.theme.is_dark()
    }

    /// Derive the device chrome tint from the current theme and forward it.
    ///
    /// The navigation bar always follows the theme. The status bar is only
    /// touched on platforms that have a status bar tint API, and is left
    /// alone in the light theme when the surface has no base color.
    pub async fn update_tint(&self) -> ThemeResult<()> {
        let is_dark = self.is_dark_themed().await;

        self.tint.set_navigation_bar_color(is_dark);

        if !self.tint.supports_status_bar() {
            log::debug!("Platform has no status bar tint, skipping");
            return Ok(());
        }

        let property = self.settings.base_color_property();
        let base = match self.surface.property_value(property) {
            Some(base) => base,
            None if is_dark => String::new(),
            None => {
                log::warn!("Surface has no '{property}' value, skipping status bar tint");
                return Ok(());
            }
        };
        let color = status_bar_tint(&base, is_dark, self.settings.status_bar_shade_percent())?;

        log::debug!("Status bar tint {color} (dark: {is_dark})");
        self.tint
            .set_status_bar_color(&color, is_dark, StatusBarStyle::Dark);
        Ok(())
    }

    pub async fn is_winter_enabled(&self) -> ThemeResult<bool> {
        self.seasonal.is_winter_enabled().await
    }

    /// Turn the winter effect on or off, colored for the current theme.
    pub async fn toggle_winter(&self, enabled: bool, persist_opt_in: bool) -> ThemeResult<()> {
        let dark = self.is_dark_themed().await;
        self.seasonal.toggle_winter(enabled, persist_opt_in, dark).await
    }

    // Re-evaluate the effect against the stored opt-in so a theme change
    // recolors it without changing whether it runs.
    async fn refresh_winter(&self) -> ThemeResult<()> {
        let enabled = self.seasonal.is_winter_enabled().await?;
        let dark = self.state.read().await.theme.is_dark();
        self.seasonal.toggle_winter(enabled, false, dark).await
    }

    fn apply_markers(&self, dark: bool, accent: &str) {
        self.surface.toggle_marker(DARK_MARKER, dark);
        if !accent.is_empty() {
            self.surface.toggle_marker(accent, true);
        }
    }

    fn rollback_markers(&self, previous: &ThemePreference, attempted: &ThemePreference) {
        log::warn!("Persisting theme failed, restoring previous markers");
        self.surface
            .toggle_marker(DARK_MARKER, previous.theme.is_dark());
        if !attempted.accent_color.is_empty() && attempted.accent_color != previous.accent_color {
            self.surface.toggle_marker(&attempted.accent_color, false);
        }
    }

    async fn persist(&self, preference: &ThemePreference) -> Result<(), PreferenceError> {
        let value =
            serde_json::to_value(preference).map_err(|e| PreferenceError::Serialization {
                key: THEME_KEY.to_string(),
                reason: e.to_string(),
            })?;
        self.store.set_object(THEME_KEY, value).await
    }
}
