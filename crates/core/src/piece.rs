//! Piece module - the active falling piece
//!
//! A piece is a shape identifier, its current orientation matrix and the
//! playfield position of the matrix's top-left corner. Rotation produces a new
//! matrix and never checks legality; the playfield decides whether a candidate
//! placement may be committed.

use crate::shapes::{shape, Matrix};
use crate::types::{ShapeId, BOARD_WIDTH};

/// Spawn position `(row, col)` for a shape
///
/// The column centers the matrix: `floor(W/2 - ceil(side/2))`. The row is -1
/// for I and -2 for everything else, so the I bar starts on visible row 0
/// while the other shapes start in the hidden buffer.
pub fn spawn_position(id: ShapeId) -> (i8, i8) {
    let side = shape(id).matrix.side() as i8;
    let col = (BOARD_WIDTH as i8) / 2 - (side + 1) / 2;
    let row = if id == ShapeId::I { -1 } else { -2 };
    (row, col)
}

/// Rotate a matrix 90° clockwise
///
/// `result[i][j] = input[N-1-j][i]`
pub fn rotate_clockwise(matrix: &Matrix) -> Matrix {
    let n = matrix.side();
    Matrix::from_fn(n, |i, j| matrix.get(n - 1 - j, i))
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeId,
    pub matrix: Matrix,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// Create a piece in canonical orientation at its spawn position
    pub fn spawn(id: ShapeId) -> Self {
        let (row, col) = spawn_position(id);
        Self {
            shape: id,
            matrix: shape(id).matrix,
            row,
            col,
        }
    }

    /// Same piece translated by `(dr, dc)`
    pub fn moved(&self, dr: i8, dc: i8) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
            ..*self
        }
    }

    /// Same piece with its matrix rotated clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            matrix: rotate_clockwise(&self.matrix),
            ..*self
        }
    }

    /// Absolute playfield coordinates `(row, col)` of occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .cells()
            .map(move |(r, c)| (self.row + r, self.col + c))
    }
}
