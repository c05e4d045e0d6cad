//! Core module - session configuration
//!
//! # Architecture
//!
//! - `resources` - [`SessionSettings`], the fixed configuration of one session
//! - `settings_persistence` - JSON load/save under the platform config directory
//! - `cli` - command-line overrides on top of the loaded settings
//! - `error` - [`CoreError`] and [`CoreResult`]
//!
//! Settings are resolved once at startup (file, then CLI flags), validated,
//! and never change while the session runs.

pub mod cli;
pub mod error;
pub mod resources;
pub mod settings_persistence;

pub use cli::Cli;
pub use error::{CoreError, CoreResult};
pub use resources::SessionSettings;
pub use settings_persistence::{load_settings, save_settings, settings_path};
