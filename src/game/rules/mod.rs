//! Chess rules module - thin wrapper over the rules library
//!
//! The session never implements chess rules itself. [`BoardState`] owns a
//! `shakmaty` position and exposes exactly what the turn controller needs:
//! per-square legal moves, move application, side to move and terminal
//! detection.

pub mod board_state;


pub use board_state::BoardState;
