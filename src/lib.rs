//! Human-vs-engine chess session
//!
//! A pointer-driven player (White) against an external UCI engine (Black).
//!
//! - `core` - settings, persistence and command-line flags
//! - `game` - rules, engine client, turn controller and session loop
//! - `input` - pointer events and pixel/square mapping
//! - `ui` - the front-end seam and a terminal front-end

pub mod core;
pub mod game;
pub mod input;
pub mod ui;

pub use game::{launch_session, run_session, SessionOutcome};
