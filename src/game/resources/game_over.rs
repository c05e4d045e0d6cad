//! Game over result tracking
//!
//! Describes how a finished game ended. The board wrapper produces these
//! values after each applied move; the turn controller stores the first one
//! it sees and reports it to the session.
//!
//! # Termination Conditions
//!
//! ## Decisive
//! - **Checkmate**: side to move is in check with no legal moves
//!
//! ## Draw
//! - **Stalemate**: side to move has no legal moves but is NOT in check
//! - **InsufficientMaterial**: neither side can deliver checkmate (e.g., K vs K)
//! - **SeventyFiveMoveRule**: 150 half-moves without a capture or pawn move
//! - **FivefoldRepetition**: same position has occurred five times
//!
//! # Reference
//!
//! FIDE Laws of Chess, Articles 5 and 9.

use crate::game::types::Side;
use std::fmt;

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl TerminalResult {
    /// Result where `side` delivered checkmate
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::White => TerminalResult::WhiteWins,
            Side::Black => TerminalResult::BlackWins,
        }
    }

    /// Get the winner of the game, `None` for draws
    pub fn winner(&self) -> Option<Side> {
        match self {
            TerminalResult::WhiteWins => Some(Side::White),
            TerminalResult::BlackWins => Some(Side::Black),
            TerminalResult::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, TerminalResult::Draw)
    }

    /// Score in PGN notation (`1-0`, `0-1`, `1/2-1/2`)
    pub fn pgn_score(&self) -> &'static str {
        match self {
            TerminalResult::WhiteWins => "1-0",
            TerminalResult::BlackWins => "0-1",
            TerminalResult::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for TerminalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pgn_score())
    }
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoveRule,
    FivefoldRepetition,
}

/// Result plus the reason that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOver {
    pub result: TerminalResult,
    pub reason: TerminationReason,
}

impl GameOver {
    pub fn checkmate(winner: Side) -> Self {
        Self {
            result: TerminalResult::win_for(winner),
            reason: TerminationReason::Checkmate,
        }
    }

    pub fn draw(reason: TerminationReason) -> Self {
        Self {
            result: TerminalResult::Draw,
            reason,
        }
    }

    /// Get a human-readable message describing the game result
    pub fn message(&self) -> &'static str {
        match (self.result, self.reason) {
            (TerminalResult::WhiteWins, _) => "White wins by checkmate!",
            (TerminalResult::BlackWins, _) => "Black wins by checkmate!",
            (TerminalResult::Draw, TerminationReason::Stalemate) => "Draw by stalemate",
            (TerminalResult::Draw, TerminationReason::InsufficientMaterial) => {
                "Draw by insufficient material"
            }
            (TerminalResult::Draw, TerminationReason::SeventyFiveMoveRule) => {
                "Draw by the seventy-five-move rule"
            }
            (TerminalResult::Draw, TerminationReason::FivefoldRepetition) => {
                "Draw by fivefold repetition"
            }
            (TerminalResult::Draw, TerminationReason::Checkmate) => "Draw",
        }
    }
}
