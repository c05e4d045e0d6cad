//! Type definitions for the chess session
//!
//! Newtypes and small value types shared by the turn controller, the board
//! wrapper and the engine client. None of these types know about the rules
//! library; conversion to and from `shakmaty` lives in
//! [`crate::game::rules::board_state`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board square as an index in `0..64`
///
/// `file = index % 8` (0 = file 'a'), `rank = index / 8` (0 = rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Create a square from its index, `None` when outside `0..64`
    pub fn new(index: u8) -> Option<Self> {
        (index < 64).then_some(Square(index))
    }

    /// Create a square from file and rank indices (both `0..8`)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let e4 = Square::from_coords(4, 3).unwrap();
    /// assert_eq!(e4.index(), 28);
    /// ```
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Square::from_coords(file, rank)
    }

    /// All 64 squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Convert square to algebraic notation (e.g., "e4")
    pub fn to_algebraic(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// Piece kinds a pawn may promote to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// Lowercase suffix used in coordinate notation (`e7e8q`)
    pub fn to_char(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }
}

/// A move as an (origin, destination, promotion) triple
///
/// Castling is expressed as the king's two-square move (`e1g1`), which is
/// both what a pointer interaction produces and what UCI engines emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

impl ChessMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PromotionPiece) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Parse coordinate notation: `e2e4`, `e7e8q`
    ///
    /// Returns `None` for anything else, including the UCI null move `0000`.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(PromotionPiece::from_char(c)?),
            None => None,
        };
        Some(Self { from, to, promotion })
    }

    /// Coordinate notation of this move
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
