//! Input module - pointer events and board/screen coordinate mapping
//!
//! # Architecture
//!
//! - `pointer` - [`InputEvent`] stream items and the [`CoordinateMapper`]
//!   that turns pixel positions into board squares (and back for the renderer)
//!
//! Front-ends produce [`InputEvent`]s; the session loop filters pointer
//! events outside the board before asking the mapper for a square.

pub mod pointer;

// Re-export commonly used items
pub use pointer::*;
