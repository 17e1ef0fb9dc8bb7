//! # themectl
//!
//! Command line host for the `theme` library. Wires the theme manager to a
//! JSON preference document on disk and to console stand-ins for the
//! rendering surface, device chrome and particle effects.
//!
//! ## Modules
//!
//! - [`adapters`] - Console implementations of the host collaborator traits
//! - [`app`] - Command execution against an initialized manager
//! - [`commands`] - Command line definition
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types
//! - [`logger`] - Logging setup

pub mod adapters;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use app::App;
pub use error::{AppError, AppResult};
