use crate::adapters::{ConsoleSurface, LogEffectRenderer, LoggingTint};
use crate::commands::Command;
use crate::config::AppConfig;
use crate::error::AppResult;
use std::fmt::Write as _;
use std::sync::Arc;
use theme::calendar::CalendarGate;
use theme::color::shade;
use theme::model::InitPhase;
use theme::platform::{
    PlatformTint, RenderSurface, navigation_bar_color, status_bar_tint,
};
use theme::settings::ThemeSettings;
use theme::storage::FilePreferenceStore;
use theme::ThemeManager;
use tokio::sync::oneshot;

/// One command line session: the theme manager wired to the console
/// adapters and the on-disk preference document.
pub struct App {
    manager: Arc<ThemeManager>,
    surface: Arc<ConsoleSurface>,
    tint: Arc<LoggingTint>,
    settings: ThemeSettings,
    calendar: CalendarGate,
}

impl App {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Self::with_calendar(config, CalendarGate::system())
    }

    pub fn with_calendar(config: &AppConfig, calendar: CalendarGate) -> AppResult<Self> {
        let settings = config.theme().clone();
        let store = Arc::new(FilePreferenceStore::new(config.storage().path()?));
        log::debug!("Using preference file {}", store.path().display());
        let surface = Arc::new(ConsoleSurface::new(
            config.surface(),
            settings.base_color_property(),
        ));
        let tint = Arc::new(LoggingTint::new(config.surface().supports_status_bar()));

        let manager = ThemeManager::new(
            store,
            surface.clone(),
            tint.clone(),
            Arc::new(LogEffectRenderer),
        )
        .with_settings(settings.clone())
        .with_calendar(calendar.clone());

        Ok(Self {
            manager: Arc::new(manager),
            surface,
            tint,
            settings,
            calendar,
        })
    }

    pub fn manager(&self) -> &Arc<ThemeManager> {
        &self.manager
    }

    pub fn surface(&self) -> &ConsoleSurface {
        &self.surface
    }

    pub fn tint(&self) -> &LoggingTint {
        &self.tint
    }

    /// Initialize the manager and wait out the splash delay, so the startup
    /// tint has been applied when this returns.
    pub async fn start(&self) -> AppResult<()> {
        let (ready_tx, ready_rx) = oneshot::channel();
        self.manager
            .init(move || {
                let _ = ready_tx.send(());
            })
            .await?;

        // The sender is only dropped unsent when the runtime shuts down.
        let _ = ready_rx.await;
        Ok(())
    }

    /// Run `command`, initializing first when it touches theme state, and
    /// return the text to print.
    pub async fn run(&self, command: &Command) -> AppResult<String> {
        if command.needs_init() && self.manager.phase() == InitPhase::Uninitialized {
            self.start().await?;
        }

        match command {
            Command::Status => self.status().await,
            Command::Dark => self.switch(true).await,
            Command::Light => self.switch(false).await,
            Command::Accent { name } => self.accent(name).await,
            Command::UndoAccent { name } => {
                self.manager.undo_color(name.as_deref()).await;
                Ok(format!("markers: {}", self.markers()))
            }
            Command::Winter { state } => self.winter(state.is_on()).await,
            Command::Shade { color, percent } => Ok(shade(color, *percent)?),
            Command::Calendar => Ok(self.calendar_report()),
        }
    }

    async fn status(&self) -> AppResult<String> {
        let dark = self.manager.is_dark_themed().await;
        let accent = self.manager.get_theme_color().await;
        let snow = self.manager.is_winter_enabled().await?;

        let status_bar = if self.tint.supports_status_bar() {
            let base = self
                .surface
                .property_value(self.settings.base_color_property())
                .unwrap_or_default();
            status_bar_tint(&base, dark, self.settings.status_bar_shade_percent())?
        } else {
            "unsupported".to_string()
        };

        let mut out = String::new();
        let _ = writeln!(out, "theme:          {}", if dark { "dark" } else { "light" });
        let _ = writeln!(out, "accent:         {}", display_accent(&accent));
        let _ = writeln!(out, "markers:        {}", self.markers());
        let _ = writeln!(out, "status bar:     {status_bar}");
        let _ = writeln!(out, "navigation bar: {}", navigation_bar_color(dark));
        let _ = writeln!(out, "snow:           {}", on_off(snow));
        out.push_str(&self.calendar_report());
        Ok(out)
    }

    async fn switch(&self, dark: bool) -> AppResult<String> {
        self.manager.toggle(dark, true, None).await?;
        Ok(format!("theme: {}", if dark { "dark" } else { "light" }))
    }

    // Apply the new accent first and only then remove the old marker, so
    // both are briefly present.
    async fn accent(&self, name: &str) -> AppResult<String> {
        let previous = self.manager.get_theme_color().await;
        let dark = self.manager.is_dark_themed().await;

        self.manager.toggle(dark, true, Some(name)).await?;
        if !previous.is_empty() && previous != name {
            self.manager.undo_color(Some(&previous)).await;
        }

        Ok(format!(
            "accent: {} (was {})",
            display_accent(name),
            display_accent(&previous)
        ))
    }

    async fn winter(&self, enabled: bool) -> AppResult<String> {
        self.manager.toggle_winter(enabled, true).await?;

        if self.calendar.is_winter_season() {
            Ok(format!("snow: {}", on_off(enabled)))
        } else {
            Ok("snow: off (outside the Dec 24-27 window, preference unchanged)".to_string())
        }
    }

    fn calendar_report(&self) -> String {
        format!(
            "winter window:  {}\nnew year:       {}",
            yes_no(self.calendar.is_winter_season()),
            yes_no(self.calendar.is_year_transition_moment())
        )
    }

    fn markers(&self) -> String {
        let markers = self.surface.markers();
        if markers.is_empty() {
            "(none)".to_string()
        } else {
            markers.join(" ")
        }
    }
}

fn display_accent(accent: &str) -> &str {
    if accent.is_empty() { "(none)" } else { accent }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
