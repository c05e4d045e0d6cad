//! Pointer events and pixel/square mapping
//!
//! The board is drawn White at the bottom: screen `y` grows downward while
//! chess ranks grow upward, so the mapper inverts the rank axis.
//!
//! ```text
//!   x →   0      100     ...    700
//! y 0   ┌──────┬──────┬─────┬──────┐
//! ↓     │  a8  │  b8  │ ... │  h8  │
//!  100  ├──────┼──────┼─────┼──────┤
//!       │ ...  │      │     │      │
//!  700  ├──────┼──────┼─────┼──────┤
//!       │  a1  │  b1  │ ... │  h1  │
//!       └──────┴──────┴─────┴──────┘
//! ```

use crate::game::types::Square;

/// Largest accepted square size; keeps every board pixel inside `i32`
pub const MAX_SQUARE_SIZE_PX: u32 = 4096;

/// Pixel position in window coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Discrete events supplied by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer button pressed at a pixel position
    PointerDown(PixelPoint),
    /// Window closed / user asked to leave
    Quit,
}

/// Converts between pointer pixels and board squares
///
/// # Examples
///
/// ```rust,ignore
/// let mapper = CoordinateMapper::new(100);
/// // Bottom-left square is a1
/// assert_eq!(mapper.square_from_point(PixelPoint::new(10, 790)).index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    square_size_px: u32,
}

impl CoordinateMapper {
    /// `square_size_px` is clamped to `1..=MAX_SQUARE_SIZE_PX`; settings
    /// validation rejects values outside that range
    pub fn new(square_size_px: u32) -> Self {
        debug_assert!(square_size_px > 0, "square size must be positive");
        Self {
            square_size_px: square_size_px.clamp(1, MAX_SQUARE_SIZE_PX),
        }
    }

    pub fn square_size_px(&self) -> u32 {
        self.square_size_px
    }

    /// Side length of the whole board in pixels
    pub fn board_size_px(&self) -> u32 {
        self.square_size_px * 8
    }

    /// Whether `point` lies on the board
    ///
    /// Callers filter with this before [`Self::square_from_point`].
    pub fn contains(&self, point: PixelPoint) -> bool {
        let size = self.board_size_px() as i64;
        (0..size).contains(&(point.x as i64)) && (0..size).contains(&(point.y as i64))
    }

    /// Square under `point`
    ///
    /// Integer-divides both axes by the square size and inverts the rank.
    /// Points off the board are the caller's responsibility; they are
    /// clamped onto the nearest edge square rather than rejected.
    pub fn square_from_point(&self, point: PixelPoint) -> Square {
        debug_assert!(self.contains(point), "point {point:?} is off the board");
        let size = self.square_size_px as i32;
        let file = (point.x.div_euclid(size)).clamp(0, 7) as u8;
        let raw_rank = (point.y.div_euclid(size)).clamp(0, 7) as u8;
        Square::from_coords(file, 7 - raw_rank)
            .unwrap_or_else(|| unreachable!("file and rank clamped to 0..8"))
    }

    /// Top-left pixel of `square`, used by renderers
    pub fn point_from_square(&self, square: Square) -> PixelPoint {
        let size = self.square_size_px as i32;
        PixelPoint {
            x: square.file() as i32 * size,
            y: (7 - square.rank() as i32) * size,
        }
    }

    /// Centre pixel of `square`
    pub fn center_of(&self, square: Square) -> PixelPoint {
        let top_left = self.point_from_square(square);
        let half = (self.square_size_px / 2) as i32;
        PixelPoint::new(top_left.x + half, top_left.y + half)
    }
}
