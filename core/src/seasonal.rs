//! Decorative seasonal effects: winter snowfall with a persisted opt-in, and a
//! one-shot celebration burst around the year transition.
//!
//! The controller exclusively owns the live snow handle. Replacing it always
//! destroys the previous handle first, and a handle that fails to tear down is
//! logged and forgotten so a broken effect library never blocks a theme
//! change.

use crate::calendar::CalendarGate;
use crate::error::{EffectError, ThemeResult};
use crate::settings::{SnowConfig, ThemeSettings};
use crate::storage::{PreferenceStore, SNOW_ENABLED_KEY};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, sleep};
use tokio_util::sync::CancellationToken;

/// A running particle effect.
pub trait EffectHandle: Send {
    fn destroy(&mut self) -> Result<(), EffectError>;
}

/// Opaque particle effect engine.
pub trait EffectRenderer: Send + Sync {
    fn start_snow(&self, config: &SnowConfig) -> Result<Box<dyn EffectHandle>, EffectError>;

    /// Emit one fire-and-forget confetti burst.
    fn confetti(&self, burst: &ConfettiBurst);
}

/// One celebration burst.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: f64,
    /// Horizontal origin as a fraction of the surface width
    pub origin_x: f64,
    /// Vertical origin as a fraction of the surface height, may be negative
    pub origin_y: f64,
    pub start_velocity: u32,
    pub spread: u32,
    pub ticks: u32,
    pub z_index: i32,
}

const BURST_MAX_PARTICLES: f64 = 20.0;

impl ConfettiBurst {
    fn at(particle_count: f64, origin_x: f64, origin_y: f64) -> Self {
        Self {
            particle_count,
            origin_x,
            origin_y,
            start_velocity: 30,
            spread: 100,
            ticks: 70,
            z_index: 0,
        }
    }
}

/// Two mirrored bursts, left and right of center.
fn burst_pair(particle_count: f64) -> [ConfettiBurst; 2] {
    let mut rng = rand::thread_rng();
    [
        ConfettiBurst::at(
            particle_count,
            rng.gen_range(0.1..0.3),
            rng.r#gen::<f64>() - 0.2,
        ),
        ConfettiBurst::at(
            particle_count,
            rng.gen_range(0.7..0.9),
            rng.r#gen::<f64>() - 0.2,
        ),
    ]
}

async fn run_celebration(renderer: Arc<dyn EffectRenderer>, duration: Duration, period: Duration) {
    let start = Instant::now();
    let end = start + duration;
    let mut ticker = interval_at(start + period, period);
    let mut bursts = 0u32;

    loop {
        ticker.tick().await;
        let time_left = end.saturating_duration_since(Instant::now());
        if time_left.is_zero() {
            break;
        }

        let particle_count =
            BURST_MAX_PARTICLES * (time_left.as_secs_f64() / duration.as_secs_f64());
        for burst in burst_pair(particle_count) {
            renderer.confetti(&burst);
        }
        bursts += 1;
    }

    log::debug!("Celebration finished after {bursts} burst pairs");
}

pub struct SeasonalController {
    renderer: Arc<dyn EffectRenderer>,
    store: Arc<dyn PreferenceStore>,
    calendar: CalendarGate,
    settings: ThemeSettings,
    snow: Mutex<Option<Box<dyn EffectHandle>>>,
    celebration_armed: AtomicBool,
    shutdown: CancellationToken,
}

impl SeasonalController {
    pub fn new(
        renderer: Arc<dyn EffectRenderer>,
        store: Arc<dyn PreferenceStore>,
        calendar: CalendarGate,
    ) -> Self {
        Self {
            renderer,
            store,
            calendar,
            settings: ThemeSettings::default(),
            snow: Mutex::new(None),
            celebration_armed: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_settings(mut self, settings: ThemeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarGate) -> Self {
        self.calendar = calendar;
        self
    }

    /// Whether snow should be showing right now. Outside the winter window the
    /// persisted opt-in is not even read.
    pub async fn is_winter_enabled(&self) -> ThemeResult<bool> {
        if !self.calendar.is_winter_season() {
            return Ok(false);
        }
        Ok(self
            .store
            .get_boolean_setting(SNOW_ENABLED_KEY, true)
            .await?)
    }

    /// Tear down any live snow, optionally record the opt-in, then start a
    /// fresh effect colored for `dark` when `enabled` and still in season.
    ///
    /// The opt-in is only written inside the winter window, so toggling the
    /// effect off in summer cannot disable next winter's snow.
    ///
    /// # Errors
    ///
    /// Only a failed opt-in write is reported. Effect teardown and start
    /// failures are logged and ignored.
    pub async fn toggle_winter(&self, enabled: bool, persist_opt_in: bool, dark: bool) -> ThemeResult<()> {
        let mut snow = self.snow.lock().await;

        if let Some(mut handle) = snow.take() {
            if let Err(e) = handle.destroy() {
                log::warn!("Ignoring snow effect teardown failure: {e}");
            }
        }

        if persist_opt_in && self.calendar.is_winter_season() {
            self.store
                .set_boolean_setting(SNOW_ENABLED_KEY, enabled)
                .await?;
        }

        if !enabled {
            return Ok(());
        }

        // The window may have closed while the opt-in was being written.
        if !self.calendar.is_winter_season() {
            log::debug!("Not starting snow effect outside the winter window");
            return Ok(());
        }

        match self.renderer.start_snow(&self.settings.snow().for_theme(dark)) {
            Ok(handle) => {
                log::debug!("Snow effect started (dark: {dark})");
                *snow = Some(handle);
            }
            Err(e) => log::warn!("Snow effect could not be started: {e}"),
        }

        Ok(())
    }

    pub async fn has_live_effect(&self) -> bool {
        self.snow.lock().await.is_some()
    }

    /// Start the year-transition celebration after `delay` if the calendar is
    /// inside the transition window. Arms at most once per controller; the
    /// returned task ends on its own once the celebration duration elapsed, or
    /// when the controller is dropped.
    pub fn schedule_celebration(&self, delay: Duration) -> Option<JoinHandle<()>> {
        if !self.calendar.is_year_transition_moment() {
            return None;
        }
        if self.celebration_armed.swap(true, Ordering::SeqCst) {
            log::debug!("Celebration already armed, not scheduling again");
            return None;
        }

        let renderer = Arc::clone(&self.renderer);
        let shutdown = self.shutdown.clone();
        let duration = self.settings.celebration_duration();
        let period = self.settings.celebration_interval().max(Duration::from_millis(1));

        log::info!("Year transition celebration scheduled in {delay:?}");
        Some(tokio::spawn(async move {
            tokio::select! {
                () = async {
                    sleep(delay).await;
                    run_celebration(renderer, duration, period).await;
                } => {},
                () = shutdown.cancelled() => {
                    log::debug!("Celebration cancelled by controller shutdown");
                }
            }
        }))
    }
}

impl Drop for SeasonalController {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(mut handle) = self.snow.get_mut().take() {
            if let Err(e) = handle.destroy() {
                log::warn!("Ignoring snow effect teardown failure on shutdown: {e}");
            }
        }
    }
}
