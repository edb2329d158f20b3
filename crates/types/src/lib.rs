//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, making them usable
//! from the core rules, the engine, and every front-end.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19)
//! - **Hidden buffer**: 2 rows above the visible grid (indexed -2 and -1)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default frame interval (~60 FPS) |
//! | `GRAVITY_TICKS` | 36 | Frames between automatic one-row descents |
//!
//! Gravity is paced by frame count, not by wall-clock time: a slow host slows
//! the game down instead of skipping rows.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{ShapeId, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeId::ALL.len(), 7);
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows above the visible grid where pieces spawn
pub const BUFFER_ROWS: u8 = 2;

/// Default frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default number of frames between gravity steps
pub const GRAVITY_TICKS: u32 = 36;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_defaults() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!(BUFFER_ROWS, 2);
        assert_eq!(GRAVITY_TICKS, 36);
    }

    #[test]
    fn all_lists_each_shape_once() {
        for (i, a) in ShapeId::ALL.iter().enumerate() {
            assert!(!ShapeId::ALL[i + 1..].contains(a), "{:?} repeated", a);
        }
    }
}

/// The seven piece shapes
///
/// Each shape has a distinct matrix and color:
/// - **I**: Cyan, 4x4 bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **T**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeId {
    /// Every shape, in catalog order
    pub const ALL: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::J,
        ShapeId::L,
        ShapeId::O,
        ShapeId::S,
        ShapeId::T,
        ShapeId::Z,
    ];
}

/// Discrete player commands
///
/// Delivered by an input source between ticks. The engine ignores all of
/// them once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Move piece one cell down, locking it if it cannot descend
    SoftDrop,
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the playfield
///
/// - `None`: Empty cell
/// - `Some(ShapeId)`: Cell settled by a piece of the given shape
pub type Cell = Option<ShapeId>;
