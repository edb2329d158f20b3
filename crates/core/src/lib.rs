//! Core game rules - pure, deterministic, and testable
//!
//! This crate contains the playfield, the shape catalog, piece rotation and
//! the shape sequencer. It has **no dependencies** on rendering, input, or
//! timing, making it:
//!
//! - **Deterministic**: Same seed produces identical shape sequences
//! - **Testable**: Every rule is a plain function or method
//! - **Portable**: Runs headless, in a terminal, or anywhere else
//!
//! # Module Structure
//!
//! - [`shapes`]: The seven shape matrices and their colors
//! - [`piece`]: Active piece, spawn positions, clockwise rotation
//! - [`playfield`]: 10x20 grid with a 2-row hidden buffer, collision, locking, line clears
//! - [`rng`]: Batch-of-seven sequencer over an injectable random source
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Piece, Playfield, Sequencer};
//!
//! let mut sequencer = Sequencer::seeded(12345);
//! let piece = Piece::spawn(sequencer.next());
//!
//! let field = Playfield::new();
//! assert!(field.is_valid_move(&piece.matrix, piece.row, piece.col));
//! ```

pub mod piece;
pub mod playfield;
pub mod rng;
pub mod shapes;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use piece::{rotate_clockwise, spawn_position, Piece};
pub use playfield::{LockOutcome, Playfield, BUFFER_TOP};
pub use rng::{RandomSource, Sequencer, SimpleRng};
pub use shapes::{color, shape, Matrix, Shape, SHAPES};
