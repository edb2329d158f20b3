//! Playfield module - manages the grid of settled cells
//!
//! The playfield is 10 columns by 20 visible rows, plus 2 hidden buffer rows
//! above row 0 where pieces spawn. Storage is a flat array for cache locality
//! and zero allocation; the buffer rows sit at the front of the array.
//!
//! Coordinates: `(row, col)` where row ranges -2..=19 (top to bottom, negative
//! rows are the hidden buffer) and col ranges 0..=9 (left to right).

use crate::piece::Piece;
use crate::shapes::Matrix;
use crate::types::{Cell, ShapeId, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS};

/// First row index of the hidden buffer
pub const BUFFER_TOP: i8 = -(BUFFER_ROWS as i8);

/// Total number of rows stored, buffer included
const TOTAL_ROWS: usize = (BOARD_HEIGHT + BUFFER_ROWS) as usize;

/// Total number of cells stored
const FIELD_SIZE: usize = TOTAL_ROWS * BOARD_WIDTH as usize;

/// Result of committing a piece to the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Every cell of the piece was written
    Locked,
    /// A cell sat above the visible grid; locking stopped there
    ToppedOut,
}

/// The playfield - 10 columns x (2 + 20) rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Playfield {
    /// Flat array of cells, row-major order, buffer rows first
    cells: [Cell; FIELD_SIZE],
}

impl Playfield {
    /// Create a new empty playfield
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    /// Calculate flat index from `(row, col)` coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < BUFFER_TOP || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        let physical = (row - BUFFER_TOP) as usize;
        Some(physical * BOARD_WIDTH as usize + col as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at `(row, col)`
    /// Returns None if out of range
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`
    /// Returns false (and leaves the grid untouched) if out of range
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within range and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if a visible row is completely filled
    pub fn is_row_full(&self, row: i8) -> bool {
        if row < 0 || row >= BOARD_HEIGHT as i8 {
            return false;
        }
        let start = (row - BUFFER_TOP) as usize * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check whether `matrix` can sit with its top-left corner at `(row, col)`
    ///
    /// An occupied matrix cell makes the placement invalid when it lands left
    /// of column 0, right of the last column, below the last visible row, or
    /// on a filled cell. Cells above the buffer top are never checked against
    /// the grid.
    pub fn is_valid_move(&self, matrix: &Matrix, row: i8, col: i8) -> bool {
        matrix.cells().all(|(r, c)| {
            let pr = row + r;
            let pc = col + c;
            if pc < 0 || pc >= BOARD_WIDTH as i8 || pr >= BOARD_HEIGHT as i8 {
                return false;
            }
            pr < BUFFER_TOP || !self.is_occupied(pr, pc)
        })
    }

    /// Write a piece's cells into the grid
    ///
    /// Cells are written in row-major order. The first cell found above the
    /// visible grid aborts the lock with [`LockOutcome::ToppedOut`]. Rows are
    /// visited top-down, so such a cell always comes first and a topped-out
    /// lock leaves the grid untouched.
    pub fn lock(&mut self, piece: &Piece) -> LockOutcome {
        for (row, col) in piece.cells() {
            if row < 0 {
                return LockOutcome::ToppedOut;
            }
            self.set(row, col, Some(piece.shape));
        }
        LockOutcome::Locked
    }

    /// Shift every row above `row` (buffer included) down by one, overwriting
    /// `row`, and empty the buffer top
    fn collapse_onto(&mut self, row: i8) {
        let width = BOARD_WIDTH as usize;
        let physical = (row - BUFFER_TOP) as usize;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..physical * width, width);

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear all full rows and return how many were cleared
    ///
    /// Scans visible rows bottom to top. A full row is collapsed and the same
    /// index is examined again, since a new row has dropped into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT as i8 - 1;

        while row >= 0 {
            if self.is_row_full(row) {
                self.collapse_onto(row);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Occupied visible cells as `(row, col, shape)`
    pub fn visible_cells(&self) -> impl Iterator<Item = (i8, i8, ShapeId)> + '_ {
        let width = BOARD_WIDTH as usize;
        let offset = BUFFER_ROWS as usize * width;
        self.cells[offset..]
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| {
                cell.map(|id| ((i / width) as i8, (i % width) as i8, id))
            })
    }

    /// Number of filled cells, buffer included
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Create from visible rows for testing; buffer rows start empty
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), BOARD_HEIGHT as usize);
        assert!(rows.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut field = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                field.set(y as i8, x as i8, *cell);
            }
        }
        field
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}
