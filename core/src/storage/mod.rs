//! Durable key/value persistence consumed by the theme manager.
//!
//! The manager only ever talks to the [`PreferenceStore`] trait. Two
//! implementations ship with the crate:
//!
//! - [`MemoryPreferenceStore`] - process-local map, used by tests and as a
//!   fallback when no durable location is available
//! - [`FilePreferenceStore`] - a single JSON document on disk, written through
//!   on every set

mod file;
mod memory;

pub use file::FilePreferenceStore;
pub use memory::MemoryPreferenceStore;

use crate::error::PreferenceError;
use async_trait::async_trait;
use serde_json::Value;

/// Storage key of the persisted [`ThemePreference`](crate::model::ThemePreference).
pub const THEME_KEY: &str = "theme";

/// Storage key of the seasonal opt-in flag.
pub const SNOW_ENABLED_KEY: &str = "snow_enabled";

/// Asynchronous key/value persistence.
///
/// Implementors provide [`get_object`](Self::get_object) and
/// [`set_object`](Self::set_object); the boolean helpers are layered on top and
/// only need overriding when the backend has a native boolean setting.
///
/// # Examples
///
/// ```no_run
/// use theme::storage::{MemoryPreferenceStore, PreferenceStore};
///
/// let store = MemoryPreferenceStore::new();
/// store.set_boolean_setting("snow_enabled", false).await?;
/// assert!(!store.get_boolean_setting("snow_enabled", true).await?);
/// ```
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` when nothing was stored.
    async fn get_object(&self, key: &str) -> Result<Option<Value>, PreferenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_object(&self, key: &str, value: Value) -> Result<(), PreferenceError>;

    /// Reads a boolean flag. Missing or non-boolean values yield `default`.
    async fn get_boolean_setting(&self, key: &str, default: bool) -> Result<bool, PreferenceError> {
        Ok(self
            .get_object(key)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(default))
    }

    async fn set_boolean_setting(&self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.set_object(key, Value::Bool(value)).await
    }
}
