//! Turn state management for the session controller
//!
//! Tracks the phase of the current turn so that pointer input is only
//! interpreted while the human is to move, and the engine is only asked for
//! a move while it is the engine's turn.

/// Turn flow state
///
/// ```text
/// AwaitingSelection ──click own movable piece──▶ AwaitingDestination
/// AwaitingDestination ──click legal target──▶ EngineTurn | GameOver
/// AwaitingDestination ──any other click──▶ AwaitingSelection
/// EngineTurn ──engine move applied──▶ AwaitingSelection | GameOver
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    /// Human to move, nothing selected
    #[default]
    AwaitingSelection,

    /// Human has selected a piece, legal destinations are known
    AwaitingDestination,

    /// Engine to move; entered automatically, ignores pointer input
    EngineTurn,

    /// Game has ended
    ///
    /// Terminal state
    GameOver,
}

impl TurnPhase {
    /// Check if this state allows human input
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            TurnPhase::AwaitingSelection | TurnPhase::AwaitingDestination
        )
    }

    pub fn is_engine_turn(&self) -> bool {
        matches!(self, TurnPhase::EngineTurn)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnPhase::GameOver)
    }

    pub fn can_transition_to(&self, next: TurnPhase) -> bool {
        use TurnPhase::*;
        matches!(
            (self, next),
            (AwaitingSelection, AwaitingDestination)
                | (AwaitingDestination, AwaitingSelection)
                | (AwaitingDestination, EngineTurn)
                | (AwaitingDestination, GameOver)
                | (EngineTurn, AwaitingSelection)
                | (EngineTurn, GameOver)
        )
    }
}

/// Phase plus move counter, owned by the turn controller
#[derive(Debug, Clone)]
pub struct TurnStateContext {
    pub phase: TurnPhase,

    /// Full-move number (increments after both players move)
    pub move_number: u32,
}

impl Default for TurnStateContext {
    fn default() -> Self {
        Self {
            phase: TurnPhase::AwaitingSelection,
            move_number: 1,
        }
    }
}

impl TurnStateContext {
    /// Transition to the next turn phase
    ///
    /// # Panics
    /// In debug builds, panics if the transition is invalid
    pub fn transition_to(&mut self, next_phase: TurnPhase) {
        #[cfg(debug_assertions)]
        if !self.phase.can_transition_to(next_phase) {
            panic!(
                "Invalid turn state transition: {:?} -> {:?}",
                self.phase, next_phase
            );
        }

        tracing::debug!("[TURN] {:?} -> {:?}", self.phase, next_phase);
        self.phase = next_phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_phase_accepts_input() {
        assert!(TurnPhase::AwaitingSelection.accepts_input());
        assert!(TurnPhase::AwaitingDestination.accepts_input());
        assert!(!TurnPhase::EngineTurn.accepts_input());
        assert!(!TurnPhase::GameOver.accepts_input());
    }

    #[test]
    fn test_turn_state_context_default() {
        let ctx = TurnStateContext::default();
        assert_eq!(ctx.phase, TurnPhase::AwaitingSelection);
        assert_eq!(ctx.move_number, 1);
    }

    #[test]
    fn test_valid_transitions() {
        let mut ctx = TurnStateContext::default();

        ctx.transition_to(TurnPhase::AwaitingDestination);
        ctx.transition_to(TurnPhase::AwaitingSelection);
        ctx.transition_to(TurnPhase::AwaitingDestination);
        ctx.transition_to(TurnPhase::EngineTurn);
        ctx.transition_to(TurnPhase::AwaitingSelection);
        assert_eq!(ctx.phase, TurnPhase::AwaitingSelection);
    }

    #[test]
    fn test_game_over_is_terminal() {
        for next in [
            TurnPhase::AwaitingSelection,
            TurnPhase::AwaitingDestination,
            TurnPhase::EngineTurn,
            TurnPhase::GameOver,
        ] {
            assert!(!TurnPhase::GameOver.can_transition_to(next));
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Invalid turn state transition")]
    fn test_invalid_transition_panics() {
        let mut ctx = TurnStateContext::default();
        // Engine never moves straight out of a fresh human turn
        ctx.transition_to(TurnPhase::EngineTurn);
    }
}
