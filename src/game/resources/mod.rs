//! Chess game resources - session state owned by the turn controller
//!
//! # Resource Categories
//!
//! ## Turn Management
//! - [`TurnStateContext`] - Turn flow state machine
//! - [`TurnPhase`] - Turn sub-states (AwaitingSelection, EngineTurn, etc.)
//!
//! ## Player Interaction
//! - [`Selection`] - Currently selected square and its legal moves
//!
//! ## Game Status
//! - [`GameOver`] - Result and termination reason
//!
//! Each resource has exactly one writer: the
//! [`TurnController`](crate::game::systems::TurnController).

pub mod game_over;
pub mod selection;
pub mod turn_state;

pub use game_over::{GameOver, TerminalResult, TerminationReason};
pub use selection::Selection;
pub use turn_state::{TurnPhase, TurnStateContext};
