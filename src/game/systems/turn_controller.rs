//! Turn controller - the session's state machine
//!
//! Interprets pointer input while the human is to move, asks the engine for
//! a move when control passes to it, and stops once the board reports a
//! terminal position. It is the only writer of the board, the selection and
//! the turn phase.
//!
//! # Selection Policy
//!
//! A click while a piece is selected either completes a legal move or drops
//! the selection. A click on another own piece does not re-select it; the
//! next click starts a fresh selection.

use crate::game::ai::MoveProvider;
use crate::game::error::{EngineError, GameError, SessionError};
use crate::game::resources::{GameOver, Selection, TurnPhase, TurnStateContext};
use crate::game::rules::BoardState;
use crate::game::types::{ChessMove, PromotionPiece, Side, Square};
use crate::input::{CoordinateMapper, PixelPoint};
use crate::ui::BoardView;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Side controlled by pointer input; the engine plays the other one
pub const HUMAN_SIDE: Side = Side::White;

/// Owns the session state and drives it turn by turn
#[derive(Debug)]
pub struct TurnController<P: MoveProvider> {
    board: BoardState,
    engine: P,
    mapper: CoordinateMapper,
    selection: Selection,
    turn: TurnStateContext,
    time_budget: Duration,
    promotion: PromotionPiece,
    game_over: Option<GameOver>,
}

impl<P: MoveProvider> TurnController<P> {
    /// Controller at the initial position, human (White) to move
    pub fn new(engine: P, mapper: CoordinateMapper, time_budget: Duration) -> Self {
        Self {
            board: BoardState::new(),
            engine,
            mapper,
            selection: Selection::default(),
            turn: TurnStateContext::default(),
            time_budget,
            promotion: PromotionPiece::default(),
            game_over: None,
        }
    }

    /// Piece chosen when a destination click matches several promotions
    pub fn with_promotion(mut self, promotion: PromotionPiece) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    pub fn move_number(&self) -> u32 {
        self.turn.move_number
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn engine(&self) -> &P {
        &self.engine
    }

    /// Result once the game has ended
    pub fn game_over(&self) -> Option<GameOver> {
        self.game_over
    }

    /// Snapshot handed to the front-end for redrawing
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            board: &self.board,
            selection: &self.selection,
            phase: self.turn.phase,
            game_over: self.game_over,
            mapper: &self.mapper,
        }
    }

    /// Pointer pressed at `point`
    ///
    /// The point must lie on the board; the session loop filters the rest.
    /// Ignored outside the human's turn.
    pub fn handle_pointer_down(&mut self, point: PixelPoint) {
        if !self.turn.phase.accepts_input() {
            debug!("[INPUT] Ignoring pointer at {:?} during {:?}", point, self.turn.phase);
            return;
        }
        let square = self.mapper.square_from_point(point);
        self.handle_square_click(square);
    }

    /// Square clicked by the human
    pub fn handle_square_click(&mut self, square: Square) {
        match self.turn.phase {
            TurnPhase::AwaitingSelection => self.try_select(square),
            TurnPhase::AwaitingDestination => self.try_complete_move(square),
            TurnPhase::EngineTurn | TurnPhase::GameOver => {
                debug!("[INPUT] Ignoring click on {} during {:?}", square, self.turn.phase);
            }
        }
    }

    fn try_select(&mut self, square: Square) {
        if self.board.side_at(square) != Some(HUMAN_SIDE) {
            debug!("[INPUT] {} holds no {:?} piece", square, HUMAN_SIDE);
            return;
        }

        let moves = self.board.legal_moves_from(square);
        if moves.is_empty() {
            debug!("[INPUT] Piece on {} has no legal moves", square);
            return;
        }

        debug!("[INPUT] Selected {} ({} legal moves)", square, moves.len());
        self.selection.select(square, moves);
        self.turn.transition_to(TurnPhase::AwaitingDestination);
    }

    fn try_complete_move(&mut self, square: Square) {
        let chosen = self.pick_move(square);
        self.selection.clear();

        let Some(mv) = chosen else {
            debug!("[INPUT] {} is not a destination, selection dropped", square);
            self.turn.transition_to(TurnPhase::AwaitingSelection);
            return;
        };

        match self.board.apply(mv) {
            Ok(()) => {
                info!("[TURN] Human plays {}", mv);
                self.finish_move(TurnPhase::EngineTurn);
            }
            Err(GameError::IllegalMove { mv }) => {
                // Selection came from this position, so the board should accept it
                warn!("[TURN] Selected move {} rejected by the board", mv);
                self.turn.transition_to(TurnPhase::AwaitingSelection);
            }
        }
    }

    /// Move from the selection landing on `square`, preferring the configured
    /// promotion piece when several share the destination
    fn pick_move(&self, square: Square) -> Option<ChessMove> {
        let mut candidates = self.selection.moves_to(square).peekable();
        let first = **candidates.peek()?;
        Some(
            candidates
                .find(|mv| mv.promotion == Some(self.promotion))
                .copied()
                .unwrap_or(first),
        )
    }

    /// Ask the engine for its move and apply it
    ///
    /// Does nothing unless the phase is [`TurnPhase::EngineTurn`].
    ///
    /// # Errors
    /// Any engine failure is fatal; the engine is stopped before returning.
    pub fn play_engine_turn(&mut self) -> Result<(), SessionError> {
        if !self.turn.phase.is_engine_turn() {
            return Ok(());
        }

        info!(
            "[TURN] Engine to move (move {}, budget {:?})",
            self.turn.move_number, self.time_budget
        );
        let mv = self.engine.request_move(&self.board, self.time_budget)?;

        if let Err(GameError::IllegalMove { mv }) = self.board.apply(mv) {
            self.engine.stop();
            return Err(EngineError::IllegalMove { mv }.into());
        }

        info!("[TURN] Engine plays {}", mv);
        self.finish_move(TurnPhase::AwaitingSelection);
        Ok(())
    }

    fn finish_move(&mut self, next: TurnPhase) {
        if self.board.side_to_move() == Side::White {
            self.turn.move_number += 1;
        }

        match self.board.game_over() {
            Some(over) => {
                info!("[TURN] Game over: {} ({})", over.result, over.message());
                self.game_over = Some(over);
                self.turn.transition_to(TurnPhase::GameOver);
            }
            None => self.turn.transition_to(next),
        }
    }

    /// Stop the engine; safe to call more than once
    pub fn shutdown(&mut self) {
        self.engine.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::EngineResult;
    use crate::game::resources::TerminalResult;
    use std::collections::VecDeque;

    /// Plays a fixed list of replies and records how it was used
    #[derive(Debug, Default)]
    struct ScriptedEngine {
        replies: VecDeque<&'static str>,
        requests: usize,
        stops: usize,
    }

    impl ScriptedEngine {
        fn new(replies: &[&'static str]) -> Self {
            Self {
                replies: replies.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl MoveProvider for ScriptedEngine {
        fn request_move(&mut self, board: &BoardState, _: Duration) -> EngineResult<ChessMove> {
            assert_eq!(board.side_to_move(), HUMAN_SIDE.opponent());
            self.requests += 1;
            let reply = self.replies.pop_front().unwrap_or("(none)");
            ChessMove::from_uci(reply).ok_or_else(|| EngineError::ProtocolParse {
                line: format!("bestmove {reply}"),
            })
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn controller(replies: &[&'static str]) -> TurnController<ScriptedEngine> {
        TurnController::new(
            ScriptedEngine::new(replies),
            CoordinateMapper::new(100),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_select_own_piece() {
        //! Clicking e2 selects it with e3/e4 as destinations
        let mut ctl = controller(&[]);
        ctl.handle_square_click(sq("e2"));

        assert_eq!(ctl.phase(), TurnPhase::AwaitingDestination);
        assert_eq!(ctl.selection().selected_square, Some(sq("e2")));
        assert_eq!(ctl.selection().destinations(), vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn test_click_empty_or_enemy_square_is_noop() {
        let mut ctl = controller(&[]);
        ctl.handle_square_click(sq("e4"));
        ctl.handle_square_click(sq("e7"));
        assert_eq!(ctl.phase(), TurnPhase::AwaitingSelection);
        assert!(!ctl.selection().is_selected());
    }

    #[test]
    fn test_click_immovable_piece_is_noop() {
        //! The a1 rook is boxed in at the start
        let mut ctl = controller(&[]);
        ctl.handle_square_click(sq("a1"));
        assert_eq!(ctl.phase(), TurnPhase::AwaitingSelection);
        assert!(!ctl.selection().is_selected());
    }

    #[test]
    fn test_non_destination_click_drops_selection() {
        //! Clicking another own piece while selected only deselects
        let mut ctl = controller(&[]);
        ctl.handle_square_click(sq("e2"));
        ctl.handle_square_click(sq("d2"));

        assert_eq!(ctl.phase(), TurnPhase::AwaitingSelection);
        assert!(!ctl.selection().is_selected());
        assert!(ctl.board().history().is_empty());
        assert_eq!(ctl.board().side_to_move(), Side::White);
    }

    #[test]
    fn test_destination_click_hands_over_to_engine() {
        let mut ctl = controller(&["e7e5"]);
        ctl.handle_square_click(sq("e2"));
        ctl.handle_square_click(sq("e4"));

        assert_eq!(ctl.phase(), TurnPhase::EngineTurn);
        assert!(!ctl.selection().is_selected());
        assert_eq!(ctl.board().side_to_move(), Side::Black);

        // Input is ignored while the engine is to move
        ctl.handle_square_click(sq("d2"));
        assert_eq!(ctl.phase(), TurnPhase::EngineTurn);
        assert!(!ctl.selection().is_selected());

        ctl.play_engine_turn().unwrap();
        assert_eq!(ctl.phase(), TurnPhase::AwaitingSelection);
        assert_eq!(ctl.board().side_to_move(), Side::White);
        assert_eq!(ctl.engine().requests, 1);
        assert_eq!(ctl.move_number(), 2);
    }

    #[test]
    fn test_engine_turn_only_runs_in_engine_phase() {
        //! No request is made unless the human has moved
        let mut ctl = controller(&["e7e5"]);
        ctl.play_engine_turn().unwrap();
        assert_eq!(ctl.engine().requests, 0);
        assert_eq!(ctl.phase(), TurnPhase::AwaitingSelection);
    }

    #[test]
    fn test_pointer_maps_to_square() {
        let mut ctl = controller(&[]);
        // Centre of e2 with 100px squares
        ctl.handle_pointer_down(PixelPoint::new(450, 650));
        assert_eq!(ctl.selection().selected_square, Some(sq("e2")));
    }

    #[test]
    fn test_engine_checkmate_ends_game() {
        //! Fool's mate delivered by the engine
        let mut ctl = controller(&["e7e5", "d8h4"]);
        for (from, to) in [("f2", "f3"), ("g2", "g4")] {
            ctl.handle_square_click(sq(from));
            ctl.handle_square_click(sq(to));
            ctl.play_engine_turn().unwrap();
        }

        assert_eq!(ctl.phase(), TurnPhase::GameOver);
        let over = ctl.game_over().unwrap();
        assert_eq!(over.result, TerminalResult::BlackWins);

        // Nothing happens after the game is over
        ctl.handle_square_click(sq("e2"));
        ctl.play_engine_turn().unwrap();
        assert_eq!(ctl.engine().requests, 2);
        assert!(!ctl.selection().is_selected());
    }

    #[test]
    fn test_human_checkmate_skips_engine() {
        let mut ctl = controller(&["e7e5", "b8c6", "g8f6"]);
        for (from, to) in [("e2", "e4"), ("f1", "c4"), ("d1", "h5")] {
            ctl.handle_square_click(sq(from));
            ctl.handle_square_click(sq(to));
            ctl.play_engine_turn().unwrap();
        }
        ctl.handle_square_click(sq("h5"));
        ctl.handle_square_click(sq("f7"));

        assert_eq!(ctl.phase(), TurnPhase::GameOver);
        assert_eq!(ctl.game_over().unwrap().result, TerminalResult::WhiteWins);
        assert_eq!(ctl.engine().requests, 3);
    }

    #[test]
    fn test_engine_error_is_fatal() {
        let mut ctl = controller(&["0000"]);
        ctl.handle_square_click(sq("e2"));
        ctl.handle_square_click(sq("e4"));

        let err = ctl.play_engine_turn().unwrap_err();
        assert!(matches!(err, SessionError::Engine(EngineError::ProtocolParse { .. })));
        // The position did not change
        assert_eq!(ctl.board().history().len(), 1);
    }

    #[test]
    fn test_engine_illegal_move_stops_engine() {
        let mut ctl = controller(&["e7e4"]);
        ctl.handle_square_click(sq("e2"));
        ctl.handle_square_click(sq("e4"));

        let err = ctl.play_engine_turn().unwrap_err();
        assert!(matches!(err, SessionError::Engine(EngineError::IllegalMove { .. })));
        assert_eq!(ctl.engine().stops, 1);
        assert_eq!(ctl.board().side_to_move(), Side::Black);
    }

    #[test]
    fn test_promotion_uses_configured_piece() {
        let mut ctl = controller(&["g7g5", "h7h6", "f8g7", "a7a6"])
            .with_promotion(PromotionPiece::Knight);
        for (from, to) in [("h2", "h4"), ("h4", "g5"), ("g5", "h6"), ("h6", "g7")] {
            ctl.handle_square_click(sq(from));
            ctl.handle_square_click(sq(to));
            ctl.play_engine_turn().unwrap();
        }
        ctl.handle_square_click(sq("g7"));
        ctl.handle_square_click(sq("h8"));

        assert_eq!(
            ctl.board().history().last().copied(),
            Some(ChessMove::with_promotion(sq("g7"), sq("h8"), PromotionPiece::Knight))
        );
        assert_eq!(ctl.board().piece_char_at(sq("h8")), Some('N'));
    }
}
