//! Engine configuration and difficulty settings
//!
//! Configures how the external engine is launched and how long it may think.
//!
//! # Difficulty Levels
//!
//! Difficulty is controlled by search time, which directly affects search depth:
//!
//! | Difficulty | Time/Move |
//! |------------|-----------|
//! | Easy       | 0.5s      |
//! | Medium     | 1.5s      |
//! | Hard       | 3.0s      |
//!
//! The engine receives the budget as `go movetime <ms>`; deeper search within
//! the budget is the engine's own business.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default engine executable, expected next to the working directory
pub const DEFAULT_ENGINE_PATH: &str = "./brainstorm";

/// Engine difficulty, expressed as thinking time per move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AIDifficulty {
    /// 0.5 seconds per move
    Easy,
    /// 1.5 seconds per move
    Medium,
    /// 3.0 seconds per move
    Hard,
}

impl AIDifficulty {
    /// Get the time allocation for this difficulty level in seconds
    pub fn seconds_per_move(self) -> f32 {
        match self {
            AIDifficulty::Easy => 0.5,
            AIDifficulty::Medium => 1.5,
            AIDifficulty::Hard => 3.0,
        }
    }
}

/// Launch and timing parameters for one engine process
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Engine executable
    pub path: PathBuf,

    /// Upper bound for the `uci`/`isready` handshake
    pub handshake_timeout: Duration,

    /// Extra wait beyond the move time budget before giving up on `bestmove`
    pub response_grace: Duration,

    /// Wait after `quit` before the process is killed
    pub quit_grace: Duration,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ENGINE_PATH),
            handshake_timeout: Duration::from_secs(10),
            response_grace: Duration::from_secs(5),
            quit_grace: Duration::from_secs(1),
        }
    }
}
