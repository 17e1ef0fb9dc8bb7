//! # Beacon Theme Library
//!
//! Theme state for the Beaconchain Dashboard client: the persisted dark/light
//! preference and accent, the status/navigation bar tint derived from it, and
//! the seasonal decorations layered on top.
//!
//! Rendering, device chrome and particle effects stay with the host; this
//! crate talks to them through the traits in [`platform`] and [`seasonal`] and
//! persists through [`storage::PreferenceStore`].
//!
//! ## Modules
//!
//! - [`calendar`] - Winter and year-transition activation windows
//! - [`color`] - Hex color parsing and percentage shading
//! - [`error`] - Error types
//! - [`gate`] - Initialization barrier for theme reads
//! - [`manager`] - The theme manager
//! - [`model`] - Persisted preference record and theme enum
//! - [`platform`] - Rendering surface and device tint boundaries
//! - [`seasonal`] - Snow and celebration effect controller
//! - [`settings`] - Delays, tint and effect tunables
//! - [`storage`] - Preference store contract and implementations
//! - [`validation`] - Accent validation

pub mod calendar;
pub mod color;
pub mod error;
pub mod gate;
pub mod manager;
pub mod model;
pub mod platform;
pub mod seasonal;
pub mod settings;
pub mod storage;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{ThemeError, ThemeResult};
pub use manager::ThemeManager;
pub use model::{Theme, ThemePreference};
