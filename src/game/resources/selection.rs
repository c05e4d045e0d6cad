//! Selection resource for tracking the selected piece

use crate::game::types::{ChessMove, Square};

/// Currently selected origin square and its legal moves
///
/// Only ever populated during the human's turn, for a square holding one of
/// the human's pieces. Every stored move starts on `selected_square`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub selected_square: Option<Square>,
    pub possible_moves: Vec<ChessMove>,
}

impl Selection {
    pub fn select(&mut self, square: Square, moves: Vec<ChessMove>) {
        debug_assert!(moves.iter().all(|mv| mv.from == square));
        self.selected_square = Some(square);
        self.possible_moves = moves;
    }

    pub fn clear(&mut self) {
        self.selected_square = None;
        self.possible_moves.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected_square.is_some()
    }

    /// Squares the selected piece may move to, without duplicates
    pub fn destinations(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = self.possible_moves.iter().map(|mv| mv.to).collect();
        squares.sort();
        squares.dedup();
        squares
    }

    /// Moves from the selection that land on `square`
    ///
    /// Several moves share a destination only for promotions.
    pub fn moves_to(&self, square: Square) -> impl Iterator<Item = &ChessMove> {
        self.possible_moves.iter().filter(move |mv| mv.to == square)
    }
}
