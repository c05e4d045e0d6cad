//! Settings persistence
//!
//! Loads and saves [`SessionSettings`] as JSON.
//!
//! # File Location
//!
//! By default settings live in `settings.json` under the user's configuration
//! directory (e.g. `~/.config/xfchess-session/settings.json`), falling back to
//! the working directory when no config directory can be determined. An
//! explicit path (the `--config` flag) replaces the default location.
//!
//! # Error Handling
//!
//! - Default location missing, unreadable or invalid: logged, defaults used
//! - Explicit path missing: defaults used
//! - Explicit path unreadable or invalid: [`CoreError`](crate::core::CoreError), the session does not start

use crate::core::error::CoreResult;
use crate::core::SessionSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Default settings file location
pub fn settings_path() -> PathBuf {
    match ProjectDirs::from("com", "trilltino", "xfchess-session") {
        Some(proj_dirs) => proj_dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

/// Load settings from `explicit`, or from [`settings_path`] when `None`
///
/// # Errors
/// Only for an explicit path that exists but cannot be read or parsed.
pub fn load_settings(explicit: Option<&Path>) -> CoreResult<SessionSettings> {
    match explicit {
        Some(path) => read_settings(path),
        None => {
            let path = settings_path();
            read_settings(&path).or_else(|e| {
                warn!(
                    "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                Ok(SessionSettings::default())
            })
        }
    }
}

fn read_settings(path: &Path) -> CoreResult<SessionSettings> {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return Ok(SessionSettings::default());
    }

    let contents = fs::read_to_string(path)?;
    let settings = serde_json::from_str::<SessionSettings>(&contents)?;
    info!("[SETTINGS] Loaded settings from {:?}", path);
    Ok(settings)
}

/// Write settings as pretty JSON, creating parent directories as needed
pub fn save_settings(settings: &SessionSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
