//! Session loop
//!
//! Runs one game from the initial position to a terminal state, a quit
//! request or a fatal error. Every iteration either lets the engine move or
//! drains the front-end's pending input, then redraws.

use crate::core::SessionSettings;
use crate::game::ai::{EngineClient, MoveProvider};
use crate::game::error::SessionError;
use crate::game::resources::GameOver;
use crate::game::systems::TurnController;
use crate::input::{CoordinateMapper, InputEvent};
use crate::ui::Frontend;
use tracing::{debug, info};

/// How a session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The board reached a terminal position
    Finished(GameOver),
    /// The user left before the game ended
    Quit,
}

/// Launch the configured engine, then play a session against it
///
/// # Errors
/// Invalid settings, or [`EngineError::Launch`](crate::game::EngineError::Launch)
/// when the engine cannot be started. Both happen before any input is polled.
pub fn launch_session<F: Frontend>(
    settings: &SessionSettings,
    frontend: &mut F,
) -> Result<SessionOutcome, SessionError> {
    settings.validate()?;
    let engine = EngineClient::launch(settings.engine_config()?)?;
    if let Some(name) = &engine.identity().name {
        info!("[SESSION] Playing against {}", name);
    }
    run_session(settings, engine, frontend)
}

/// Play a session with an already-started engine
///
/// The engine is stopped on every exit path.
pub fn run_session<P: MoveProvider, F: Frontend>(
    settings: &SessionSettings,
    engine: P,
    frontend: &mut F,
) -> Result<SessionOutcome, SessionError> {
    let mapper = CoordinateMapper::new(settings.square_size_px);
    let mut controller = match settings.time_budget() {
        Ok(budget) => TurnController::new(engine, mapper, budget).with_promotion(settings.promotion),
        Err(e) => {
            let mut engine = engine;
            engine.stop();
            return Err(e.into());
        }
    };

    let outcome = drive(&mut controller, frontend);
    controller.shutdown();
    outcome
}

fn drive<P: MoveProvider, F: Frontend>(
    controller: &mut TurnController<P>,
    frontend: &mut F,
) -> Result<SessionOutcome, SessionError> {
    info!("[SESSION] Session started");
    frontend.redraw(&controller.view());

    loop {
        if let Some(over) = controller.game_over() {
            info!(
                "[SESSION] Game Over! Result: {} ({})",
                over.result.pgn_score(),
                over.message()
            );
            return Ok(SessionOutcome::Finished(over));
        }

        if controller.phase().is_engine_turn() {
            controller.play_engine_turn()?;
        } else {
            for event in frontend.poll_events() {
                match event {
                    InputEvent::Quit => {
                        info!("[SESSION] Quit requested");
                        return Ok(SessionOutcome::Quit);
                    }
                    // Rest of the batch after the human moved: only a quit still counts
                    InputEvent::PointerDown(point) if !controller.phase().accepts_input() => {
                        debug!("[SESSION] Dropping click at {:?} after the turn ended", point);
                    }
                    InputEvent::PointerDown(point) if !controller.mapper().contains(point) => {
                        debug!("[SESSION] Ignoring click outside the board at {:?}", point);
                    }
                    InputEvent::PointerDown(point) => controller.handle_pointer_down(point),
                }
            }
        }

        frontend.redraw(&controller.view());
    }
}
