//! Chess game systems module - session control logic
//!
//! # System Organization
//!
//! - [`turn_controller`] - pointer interpretation, engine turns, game end
//!
//! # Execution Order
//!
//! One iteration of the session loop runs at most one of these:
//!
//! ```text
//! ┌─────────────────┐
//! │ Input           │  Human clicks squares
//! │                 │  → Updates Selection, applies the human move
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Engine turn     │  Blocking request to the engine
//! │                 │  → Applies the engine move
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Redraw          │  Front-end renders the new position
//! └─────────────────┘
//! ```

pub mod turn_controller;

pub use turn_controller::{TurnController, HUMAN_SIDE};
