//! Error types for game module
//!
//! Provides custom error types for board updates, the engine client and the
//! session loop that ties them together.

use crate::game::types::ChessMove;
use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur when updating the board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Move is not in the legal set of the current position
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: ChessMove },
}

/// Errors raised by the engine client
///
/// Every variant is fatal for the session: the engine process has already
/// been stopped by the time one of these reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Executable missing, not runnable, or the handshake did not complete
    #[error("Failed to launch engine {path:?}: {message}")]
    Launch { path: PathBuf, message: String },

    /// No best move within the time budget plus grace period
    #[error("Engine did not answer within {waited:?}")]
    Timeout { waited: Duration },

    /// Response line could not be understood
    #[error("Malformed engine response: {line:?}")]
    ProtocolParse { line: String },

    /// Well-formed best move that is not legal in the current position
    #[error("Engine played an illegal move: {mv}")]
    IllegalMove { mv: ChessMove },

    /// Operation issued in a state that does not allow it
    #[error("Engine is not ready (state: {state})")]
    NotReady { state: &'static str },

    /// Pipe failure while talking to the engine
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that end a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Settings(#[from] crate::core::CoreError),
}

/// Result type alias for board operations
pub type GameResult<T> = Result<T, GameError>;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
