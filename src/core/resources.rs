//! Session settings
//!
//! Configuration resolved at startup and fixed for the whole session.
//! Every field has a default so partial JSON files load cleanly.

use crate::core::error::{CoreError, CoreResult};
use crate::game::ai::{EngineConfig, DEFAULT_ENGINE_PATH};
use crate::game::types::PromotionPiece;
use crate::input::MAX_SQUARE_SIZE_PX;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for every seconds field (one hour)
pub const MAX_SECONDS: f32 = 3600.0;

/// Settings for one human-vs-engine session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Engine executable
    pub engine_path: PathBuf,

    /// Side length of one board square in pixels
    pub square_size_px: u32,

    /// Engine thinking time per move
    pub seconds_per_move: f32,

    /// Extra wait for `bestmove` beyond the thinking time
    pub response_grace_secs: f32,

    /// Upper bound for the engine handshake
    pub handshake_timeout_secs: f32,

    /// Wait after `quit` before the engine is killed
    pub quit_grace_secs: f32,

    /// Piece the human promotes to
    pub promotion: PromotionPiece,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from(DEFAULT_ENGINE_PATH),
            square_size_px: 100,
            seconds_per_move: 2.0,
            response_grace_secs: 5.0,
            handshake_timeout_secs: 10.0,
            quit_grace_secs: 1.0,
            promotion: PromotionPiece::Queen,
        }
    }
}

impl SessionSettings {
    /// Check ranges before a session starts
    ///
    /// # Errors
    /// [`CoreError::InvalidSetting`] naming the first bad field.
    pub fn validate(&self) -> CoreResult<()> {
        if self.square_size_px == 0 || self.square_size_px > MAX_SQUARE_SIZE_PX {
            return Err(invalid(&format!(
                "square_size_px must be between 1 and {MAX_SQUARE_SIZE_PX}"
            )));
        }
        if self.engine_path.as_os_str().is_empty() {
            return Err(invalid("engine_path must not be empty"));
        }
        if !(self.seconds_per_move > 0.0) {
            return Err(invalid("seconds_per_move must be greater than zero"));
        }
        secs("seconds_per_move", self.seconds_per_move)?;
        secs("response_grace_secs", self.response_grace_secs)?;
        secs("handshake_timeout_secs", self.handshake_timeout_secs)?;
        secs("quit_grace_secs", self.quit_grace_secs)?;
        Ok(())
    }

    /// Engine thinking time per move
    pub fn time_budget(&self) -> CoreResult<Duration> {
        secs("seconds_per_move", self.seconds_per_move)
    }

    /// Launch parameters for the engine process
    pub fn engine_config(&self) -> CoreResult<EngineConfig> {
        Ok(EngineConfig {
            path: self.engine_path.clone(),
            handshake_timeout: secs("handshake_timeout_secs", self.handshake_timeout_secs)?,
            response_grace: secs("response_grace_secs", self.response_grace_secs)?,
            quit_grace: secs("quit_grace_secs", self.quit_grace_secs)?,
        })
    }
}

fn secs(field: &str, value: f32) -> CoreResult<Duration> {
    if !(0.0..=MAX_SECONDS).contains(&value) {
        return Err(invalid(&format!(
            "{field} must be between 0 and {MAX_SECONDS} seconds"
        )));
    }
    Duration::try_from_secs_f32(value)
        .map_err(|_| invalid(&format!("{field} must be a non-negative number of seconds")))
}

fn invalid(message: &str) -> CoreError {
    CoreError::InvalidSetting {
        message: message.to_string(),
    }
}
