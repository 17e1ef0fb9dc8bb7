//! Recording collaborators for exercising the theme manager without a UI.
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! downstream integration tests.

use crate::error::{EffectError, PreferenceError};
use crate::platform::{PlatformTint, RenderSurface, StatusBarStyle};
use crate::seasonal::{ConfettiBurst, EffectHandle, EffectRenderer};
use crate::settings::SnowConfig;
use crate::storage::{MemoryPreferenceStore, PreferenceStore};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Local date-time shorthand for calendar fixtures.
///
/// # Panics
///
/// Panics when the arguments do not form a valid date and time.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid fixture date")
}

/// Rendering surface that records markers in a set.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    markers: Mutex<BTreeSet<String>>,
    properties: Mutex<HashMap<String, String>>,
    prefers_dark: AtomicBool,
}

impl RecordingSurface {
    pub fn new(prefers_dark: bool) -> Self {
        let surface = Self::default();
        surface.prefers_dark.store(prefers_dark, Ordering::SeqCst);
        surface
    }

    pub fn with_property(self, name: &str, value: &str) -> Self {
        lock(&self.properties).insert(name.to_string(), value.to_string());
        self
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        lock(&self.markers).contains(marker)
    }

    pub fn markers(&self) -> Vec<String> {
        lock(&self.markers).iter().cloned().collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn toggle_marker(&self, marker: &str, enabled: bool) {
        let mut markers = lock(&self.markers);
        if enabled {
            markers.insert(marker.to_string());
        } else {
            markers.remove(marker);
        }
    }

    fn property_value(&self, name: &str) -> Option<String> {
        lock(&self.properties).get(name).cloned()
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark.load(Ordering::SeqCst)
    }
}

/// Status and navigation bar calls, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TintCall {
    StatusBar {
        color: String,
        is_dark: bool,
        style: StatusBarStyle,
    },
    NavigationBar {
        is_dark: bool,
    },
}

#[derive(Debug)]
pub struct RecordingTint {
    supports_status_bar: bool,
    calls: Mutex<Vec<TintCall>>,
}

impl RecordingTint {
    pub fn new(supports_status_bar: bool) -> Self {
        Self {
            supports_status_bar,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<TintCall> {
        lock(&self.calls).clone()
    }

    pub fn status_bar_colors(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                TintCall::StatusBar { color, .. } => Some(color.clone()),
                TintCall::NavigationBar { .. } => None,
            })
            .collect()
    }
}

impl PlatformTint for RecordingTint {
    fn supports_status_bar(&self) -> bool {
        self.supports_status_bar
    }

    fn set_status_bar_color(&self, color: &str, is_dark: bool, style: StatusBarStyle) {
        lock(&self.calls).push(TintCall::StatusBar {
            color: color.to_string(),
            is_dark,
            style,
        });
    }

    fn set_navigation_bar_color(&self, is_dark: bool) {
        lock(&self.calls).push(TintCall::NavigationBar { is_dark });
    }
}

#[derive(Debug, Default)]
struct RendererCounters {
    live: AtomicUsize,
    destroyed: AtomicUsize,
    fail_teardown: AtomicBool,
}

struct RecordingHandle {
    counters: Arc<RendererCounters>,
    alive: bool,
}

impl EffectHandle for RecordingHandle {
    fn destroy(&mut self) -> Result<(), EffectError> {
        if self.alive {
            self.alive = false;
            self.counters.live.fetch_sub(1, Ordering::SeqCst);
            self.counters.destroyed.fetch_add(1, Ordering::SeqCst);
        }
        if self.counters.fail_teardown.load(Ordering::SeqCst) {
            return Err(EffectError::Teardown("scripted teardown failure".to_string()));
        }
        Ok(())
    }
}

/// Effect renderer that counts live snow handles and records bursts.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    counters: Arc<RendererCounters>,
    fail_start: AtomicBool,
    started: Mutex<Vec<SnowConfig>>,
    bursts: Mutex<Vec<ConfettiBurst>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_teardown(&self, fail: bool) {
        self.counters.fail_teardown.store(fail, Ordering::SeqCst);
    }

    pub fn fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.counters.destroyed.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> Vec<SnowConfig> {
        lock(&self.started).clone()
    }

    pub fn bursts(&self) -> Vec<ConfettiBurst> {
        lock(&self.bursts).clone()
    }
}

impl EffectRenderer for RecordingRenderer {
    fn start_snow(&self, config: &SnowConfig) -> Result<Box<dyn EffectHandle>, EffectError> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(EffectError::Start("scripted start failure".to_string()));
        }
        lock(&self.started).push(config.clone());
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingHandle {
            counters: Arc::clone(&self.counters),
            alive: true,
        }))
    }

    fn confetti(&self, burst: &ConfettiBurst) {
        lock(&self.bursts).push(burst.clone());
    }
}

/// A [`MemoryPreferenceStore`] whose reads can be held back or failed and
/// whose writes can be failed on demand.
#[derive(Debug)]
pub struct ScriptedStore {
    inner: MemoryPreferenceStore,
    fail_reads: AtomicBool,
    failing_key: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
    reads_open: watch::Sender<bool>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::over(MemoryPreferenceStore::new())
    }

    /// Script a store over existing data, e.g. to simulate a restart.
    pub fn over(inner: MemoryPreferenceStore) -> Self {
        let (reads_open, _) = watch::channel(true);
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            failing_key: Mutex::new(None),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
            reads_open,
        }
    }

    pub fn inner(&self) -> &MemoryPreferenceStore {
        &self.inner
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Fail reads of `key` only; `None` clears it.
    pub fn fail_reads_of(&self, key: Option<&str>) {
        *lock(&self.failing_key) = key.map(str::to_string);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Suspend every read until [`release_reads`](Self::release_reads).
    pub fn hold_reads(&self) {
        self.reads_open.send_replace(false);
    }

    pub fn release_reads(&self) {
        self.reads_open.send_replace(true);
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for ScriptedStore {
    async fn get_object(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let mut open = self.reads_open.subscribe();
        // The sender lives as long as self, so this only ends once released.
        let _ = open.wait_for(|open| *open).await;

        let key_fails = lock(&self.failing_key).as_deref() == Some(key);
        if key_fails || self.fail_reads.load(Ordering::SeqCst) {
            return Err(PreferenceError::Read {
                key: key.to_string(),
                reason: "scripted read failure".to_string(),
            });
        }
        self.inner.get_object(key).await
    }

    async fn set_object(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PreferenceError::Write {
                key: key.to_string(),
                reason: "scripted write failure".to_string(),
            });
        }
        self.inner.set_object(key, value).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
