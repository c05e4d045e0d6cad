//! UI module - renderer/input collaborator boundary
//!
//! The session never draws anything itself. A [`Frontend`] supplies input
//! events and is asked to redraw after every loop iteration with a
//! [`BoardView`] of the current state.
//!
//! - **terminal**: line-oriented front-end on stdin/stdout

pub mod terminal;

pub use terminal::TerminalFrontend;

use crate::game::resources::{GameOver, Selection, TurnPhase};
use crate::game::rules::BoardState;
use crate::input::{CoordinateMapper, InputEvent};

/// Everything a renderer may look at
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub board: &'a BoardState,
    pub selection: &'a Selection,
    pub phase: TurnPhase,
    pub game_over: Option<GameOver>,
    pub mapper: &'a CoordinateMapper,
}

/// Renderer and input source driven by the session loop
pub trait Frontend {
    /// Events that arrived since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Render the current state
    fn redraw(&mut self, view: &BoardView<'_>);
}
