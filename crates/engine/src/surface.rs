//! Render collaborator interface.
//!
//! The engine draws each frame through a [`Surface`]: one clear, one call per
//! visible filled cell, and the overlay once the game is over. Coordinates are
//! playfield `(row, col)`; mapping them to pixels or terminal cells is up to
//! the implementation.

use crate::types::Rgb;

pub trait Surface {
    /// Erase the previous frame
    fn clear_surface(&mut self);

    /// Fill the playfield cell at `(row, col)`
    fn draw_cell(&mut self, row: i8, col: i8, color: Rgb);

    /// Mark the game as finished
    fn draw_game_over_overlay(&mut self);
}

/// Headless surface that records the most recent frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    /// Cells drawn since the last clear
    pub cells: Vec<(i8, i8, Rgb)>,
    /// Whether the overlay was drawn since the last clear
    pub game_over: bool,
    /// Total number of clears (frames started)
    pub clears: usize,
}

impl RecordingSurface {
    /// Color drawn at `(row, col)` in the current frame, if any
    pub fn color_at(&self, row: i8, col: i8) -> Option<Rgb> {
        self.cells
            .iter()
            .rev()
            .find(|&&(r, c, _)| r == row && c == col)
            .map(|&(_, _, color)| color)
    }
}

impl Surface for RecordingSurface {
    fn clear_surface(&mut self) {
        self.cells.clear();
        self.game_over = false;
        self.clears += 1;
    }

    fn draw_cell(&mut self, row: i8, col: i8, color: Rgb) {
        self.cells.push((row, col, color));
    }

    fn draw_game_over_overlay(&mut self) {
        self.game_over = true;
    }
}
