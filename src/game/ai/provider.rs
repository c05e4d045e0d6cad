//! Seam between the turn controller and whatever supplies engine moves

use crate::game::error::EngineResult;
use crate::game::rules::BoardState;
use crate::game::types::ChessMove;
use std::time::Duration;

/// Source of moves for the engine-controlled side
///
/// Implemented by [`EngineClient`](super::EngineClient); tests substitute a
/// scripted provider.
pub trait MoveProvider {
    /// Best move for the side to move in `board`, blocking up to `time_budget`
    /// plus any grace period the provider allows
    ///
    /// An `Err` is fatal for the session and the provider must already be
    /// stopped when it returns one.
    fn request_move(&mut self, board: &BoardState, time_budget: Duration)
        -> EngineResult<ChessMove>;

    /// Release the provider's resources; idempotent
    fn stop(&mut self);
}
