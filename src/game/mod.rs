//! Chess game logic module - one human-vs-engine session
//!
//! # Module Organization
//!
//! - `types` - squares, sides, moves in coordinate notation
//! - `rules` - [`BoardState`](rules::BoardState), the authoritative position
//! - `resources` - selection, turn phase and game-over records
//! - `ai` - the external UCI engine and the [`MoveProvider`](ai::MoveProvider) seam
//! - `systems` - the turn controller state machine
//! - `session` - the loop tying controller, engine and front-end together
//! - `error` - game, engine and session errors
//!
//! # Turn Flow
//!
//! 1. Human clicks select a piece and then a destination
//! 2. The move is applied and control passes to the engine
//! 3. The engine move is validated and applied
//! 4. Repeat until the board reports a terminal position

pub mod ai;
pub mod error;
pub mod resources;
pub mod rules;
pub mod session;
pub mod systems;
pub mod types;

pub use error::{EngineError, GameError, SessionError};
pub use session::{launch_session, run_session, SessionOutcome};
