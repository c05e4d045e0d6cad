//! Chess engine opponent
//!
//! The opposing side is played by an external UCI engine process.
//!
//! # Architecture
//!
//! - `EngineClient`: owns the subprocess, runs the handshake and one
//!   `position`/`go`/`bestmove` exchange per engine turn
//! - `MoveProvider`: the trait the turn controller calls; lets tests swap in
//!   a scripted opponent
//! - `protocol`: UCI line builders and parsers
//! - `resource`: launch/timing configuration and difficulty presets
//!
//! The request is synchronous: the session loop is blocked while the engine
//! thinks, bounded by the move time budget plus a grace period.

pub mod engine_client;
pub mod protocol;
pub mod provider;
pub mod resource;

// Re-export for convenience
pub use engine_client::{EngineClient, EngineState};
pub use protocol::EngineIdentity;
pub use provider::MoveProvider;
pub use resource::{AIDifficulty, EngineConfig, DEFAULT_ENGINE_PATH};
