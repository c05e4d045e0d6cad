//! Board state wrapper around the `shakmaty` rules library
//!
//! This is the only module that talks to the rules library. Everything it
//! hands out is expressed in the session's own [`Square`]/[`ChessMove`]
//! types, with castling in king-two-squares form.

use crate::game::error::{GameError, GameResult};
use crate::game::resources::{GameOver, TerminalResult, TerminationReason};
use crate::game::types::{ChessMove, PromotionPiece, Side, Square};
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role};
use std::collections::HashMap;

/// Half-moves without capture or pawn move that end the game
const SEVENTY_FIVE_MOVE_HALFMOVES: u32 = 150;

/// Occurrences of one position that end the game
const FIVEFOLD_REPETITION: u32 = 5;

/// Authoritative position of the session
///
/// Mutated only through [`BoardState::apply`]. Keeps the move list from the
/// initial position (for the engine's position line) and a repetition table.
#[derive(Debug, Clone)]
pub struct BoardState {
    position: Chess,
    history: Vec<ChessMove>,
    repetitions: HashMap<String, u32>,
    game_over: Option<GameOver>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Standard initial position, White to move
    pub fn new() -> Self {
        let position = Chess::default();
        let mut repetitions = HashMap::new();
        repetitions.insert(repetition_key(&position), 1);
        Self {
            position,
            history: Vec::new(),
            repetitions,
            game_over: None,
        }
    }

    /// Play `moves` from the initial position
    pub fn replay(moves: impl IntoIterator<Item = ChessMove>) -> GameResult<Self> {
        let mut board = Self::new();
        for mv in moves {
            board.apply(mv)?;
        }
        Ok(board)
    }

    /// Legal moves starting on `square`
    ///
    /// Empty when the square is empty or holds a piece of the side not to move.
    pub fn legal_moves_from(&self, square: Square) -> Vec<ChessMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(to_chess_move)
            .filter(|mv| mv.from == square)
            .collect()
    }

    /// All legal moves of the side to move
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(to_chess_move)
            .collect()
    }

    /// Apply a legal move, toggling the side to move
    ///
    /// # Errors
    /// [`GameError::IllegalMove`] if `mv` is not legal here; the position is
    /// left untouched in that case.
    pub fn apply(&mut self, mv: ChessMove) -> GameResult<()> {
        let legal = self
            .position
            .legal_moves()
            .into_iter()
            .find(|candidate| to_chess_move(candidate) == Some(mv))
            .ok_or(GameError::IllegalMove { mv })?;

        self.position.play_unchecked(&legal);
        self.history.push(mv);

        let occurrences = self
            .repetitions
            .entry(repetition_key(&self.position))
            .or_insert(0);
        *occurrences += 1;
        let occurrences = *occurrences;

        self.game_over = self.evaluate_terminal(occurrences);
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over.is_some()
    }

    /// Result of a finished game, `None` while the game is running
    pub fn terminal_result(&self) -> Option<TerminalResult> {
        self.game_over.map(|over| over.result)
    }

    /// Result plus termination reason
    pub fn game_over(&self) -> Option<GameOver> {
        self.game_over
    }

    pub fn side_to_move(&self) -> Side {
        from_color(self.position.turn())
    }

    /// Owner of the piece on `square`, if any
    pub fn side_at(&self, square: Square) -> Option<Side> {
        self.position
            .board()
            .color_at(to_shakmaty_square(square))
            .map(from_color)
    }

    /// FEN character of the piece on `square` (`P` white pawn, `k` black king)
    pub fn piece_char_at(&self, square: Square) -> Option<char> {
        self.position
            .board()
            .piece_at(to_shakmaty_square(square))
            .map(|piece| piece.char())
    }

    /// Moves played since the initial position
    pub fn history(&self) -> &[ChessMove] {
        &self.history
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    fn evaluate_terminal(&self, occurrences: u32) -> Option<GameOver> {
        let pos = &self.position;
        if pos.is_checkmate() {
            // The side to move is mated
            return Some(GameOver::checkmate(from_color(pos.turn()).opponent()));
        }
        if pos.is_stalemate() {
            return Some(GameOver::draw(TerminationReason::Stalemate));
        }
        if pos.is_insufficient_material() {
            return Some(GameOver::draw(TerminationReason::InsufficientMaterial));
        }
        if pos.halfmoves() >= SEVENTY_FIVE_MOVE_HALFMOVES {
            return Some(GameOver::draw(TerminationReason::SeventyFiveMoveRule));
        }
        if occurrences >= FIVEFOLD_REPETITION {
            return Some(GameOver::draw(TerminationReason::FivefoldRepetition));
        }
        None
    }
}

/// Placement, side to move, castling rights and en passant square
fn repetition_key(position: &Chess) -> String {
    let fen = Fen::from_position(position.clone(), EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

fn to_chess_move(mv: &Move) -> Option<ChessMove> {
    match mv.to_uci(CastlingMode::Standard) {
        UciMove::Normal {
            from,
            to,
            promotion,
        } => Some(ChessMove {
            from: from_shakmaty_square(from)?,
            to: from_shakmaty_square(to)?,
            promotion: promotion.and_then(from_role),
        }),
        _ => None,
    }
}

fn from_role(role: Role) -> Option<PromotionPiece> {
    match role {
        Role::Queen => Some(PromotionPiece::Queen),
        Role::Rook => Some(PromotionPiece::Rook),
        Role::Bishop => Some(PromotionPiece::Bishop),
        Role::Knight => Some(PromotionPiece::Knight),
        Role::Pawn | Role::King => None,
    }
}

fn from_color(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn to_shakmaty_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square.index()))
}

// Both sides index a1 = 0 .. h8 = 63
fn from_shakmaty_square(square: shakmaty::Square) -> Option<Square> {
    Square::new(square as u8)
}
