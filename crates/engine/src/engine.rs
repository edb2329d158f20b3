//! Engine module - orchestrates the game
//!
//! Ties together the playfield, the active piece and the sequencer. All
//! mutable game data lives in a single [`EngineState`] value owned by the
//! engine, so independent games can run side by side and tests can start
//! from any position.
//!
//! The engine is driven from two directions:
//! - [`Engine::tick`] / [`Engine::step`], invoked once per frame by a scheduler
//! - [`Engine::handle_input`], invoked between frames with a player [`Command`]
//!
//! Both run to completion; neither blocks.

use log::{debug, info, trace};

use crate::core::{
    color, LockOutcome, Piece, Playfield, RandomSource, Sequencer, SimpleRng,
};
use crate::surface::Surface;
use crate::types::{Command, GRAVITY_TICKS};

/// Tunables for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Frames between automatic one-row descents
    pub gravity_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity_ticks: GRAVITY_TICKS,
        }
    }
}

/// Lifecycle of a game. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What a tick (or a landing soft drop) did
///
/// When a tick both moves and lands a piece, the landing is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over; nothing changed
    Halted,
    /// Gravity threshold not reached and nothing landed
    Waiting,
    /// The active piece descended one row
    Fell,
    /// The active piece locked and the next piece was dispatched
    Landed { lines_cleared: usize },
    /// The game ended during this call
    GameOver,
}

/// All mutable game data
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub playfield: Playfield,
    pub active: Option<Piece>,
    /// Frames since the last gravity step
    pub tick_count: u32,
    pub status: GameStatus,
}

impl EngineState {
    /// Empty playfield, no active piece, running
    pub fn new() -> Self {
        Self {
            playfield: Playfield::new(),
            active: None,
            tick_count: 0,
            status: GameStatus::Running,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// The game engine
#[derive(Debug, Clone)]
pub struct Engine<R = SimpleRng> {
    state: EngineState,
    sequencer: Sequencer<R>,
    config: EngineConfig,
}

impl Engine<SimpleRng> {
    /// Start a game with default config and a deterministic sequencer
    pub fn new(seed: u32) -> Self {
        Self::with_sequencer(EngineConfig::default(), Sequencer::seeded(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    /// Start a game: empty playfield, first piece drawn from `sequencer`
    pub fn with_sequencer(config: EngineConfig, sequencer: Sequencer<R>) -> Self {
        let mut engine = Self::from_state(config, EngineState::new(), sequencer);
        engine.spawn_next();
        engine
    }

    /// Resume from an existing state; no piece is spawned
    pub fn from_state(config: EngineConfig, state: EngineState, sequencer: Sequencer<R>) -> Self {
        Self {
            state,
            sequencer,
            config,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_game_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }

    pub fn active(&self) -> Option<Piece> {
        self.state.active
    }

    pub fn playfield(&self) -> &Playfield {
        &self.state.playfield
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn sequencer(&self) -> &Sequencer<R> {
        &self.sequencer
    }

    /// Advance one frame of game logic
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Halted;
        }

        let mut outcome = TickOutcome::Waiting;

        self.state.tick_count += 1;
        if self.state.tick_count >= self.config.gravity_ticks {
            self.state.tick_count = 0;
            outcome = if self.try_shift(1, 0) {
                TickOutcome::Fell
            } else {
                self.land()
            };
        }

        // A piece that cannot descend locks now rather than at the next gravity step.
        if !self.is_game_over() && !self.can_descend() {
            outcome = self.land();
        }

        outcome
    }

    /// Advance one frame and draw the result
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickOutcome {
        let outcome = self.tick();
        self.render(surface);
        outcome
    }

    /// Apply a player command. Returns true if the game state changed.
    pub fn handle_input(&mut self, command: Command) -> bool {
        if self.is_game_over() {
            return false;
        }

        match command {
            Command::MoveLeft => self.try_shift(0, -1),
            Command::MoveRight => self.try_shift(0, 1),
            Command::Rotate => self.try_rotate(),
            Command::SoftDrop => {
                if self.try_shift(1, 0) {
                    true
                } else {
                    !matches!(self.land(), TickOutcome::Waiting)
                }
            }
        }
    }

    /// Draw locked cells, the active piece and (when over) the overlay
    ///
    /// Cells in the hidden buffer are not drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_surface();

        for (row, col, id) in self.state.playfield.visible_cells() {
            surface.draw_cell(row, col, color(id));
        }

        if let Some(piece) = self.state.active {
            let piece_color = color(piece.shape);
            for (row, col) in piece.cells().filter(|&(row, _)| row >= 0) {
                surface.draw_cell(row, col, piece_color);
            }
        }

        if self.is_game_over() {
            surface.draw_game_over_overlay();
        }
    }

    fn is_valid(&self, piece: &Piece) -> bool {
        self.state
            .playfield
            .is_valid_move(&piece.matrix, piece.row, piece.col)
    }

    fn can_descend(&self) -> bool {
        match self.state.active {
            Some(piece) => self.is_valid(&piece.moved(1, 0)),
            None => true,
        }
    }

    /// Try to move the active piece
    fn try_shift(&mut self, dr: i8, dc: i8) -> bool {
        let Some(active) = self.state.active else {
            return false;
        };

        let candidate = active.moved(dr, dc);
        if !self.is_valid(&candidate) {
            return false;
        }

        trace!(
            "{:?} moved to ({}, {})",
            candidate.shape,
            candidate.row,
            candidate.col
        );
        self.state.active = Some(candidate);
        true
    }

    /// Try to rotate the active piece in place (no kicks)
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.state.active else {
            return false;
        };

        let candidate = active.rotated();
        if !self.is_valid(&candidate) {
            return false;
        }

        trace!("{:?} rotated", candidate.shape);
        self.state.active = Some(candidate);
        true
    }

    /// Lock the active piece, clear rows, and dispatch the next piece
    fn land(&mut self) -> TickOutcome {
        let Some(piece) = self.state.active.take() else {
            return TickOutcome::Waiting;
        };

        if self.state.playfield.lock(&piece) == LockOutcome::ToppedOut {
            info!(
                "game over: {:?} locked above the visible grid at ({}, {})",
                piece.shape, piece.row, piece.col
            );
            self.state.status = GameStatus::GameOver;
            return TickOutcome::GameOver;
        }

        let lines_cleared = self.state.playfield.clear_full_rows();
        debug!(
            "{:?} locked at ({}, {}), {} line(s) cleared",
            piece.shape, piece.row, piece.col, lines_cleared
        );

        self.spawn_next();
        if self.is_game_over() {
            return TickOutcome::GameOver;
        }

        TickOutcome::Landed { lines_cleared }
    }

    /// Install the next shape from the sequencer at its spawn position
    fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.sequencer.next());

        if !self.is_valid(&piece) {
            info!("game over: {:?} cannot spawn", piece.shape);
            self.state.active = None;
            self.state.status = GameStatus::GameOver;
            return;
        }

        trace!("spawned {:?} at ({}, {})", piece.shape, piece.row, piece.col);
        self.state.active = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape;
    use crate::surface::RecordingSurface;
    use crate::types::ShapeId;

    fn engine_with(active: Piece, gravity_ticks: u32) -> Engine {
        let state = EngineState {
            active: Some(active),
            ..EngineState::new()
        };
        Engine::from_state(EngineConfig { gravity_ticks }, state, Sequencer::seeded(7))
    }

    #[test]
    fn test_new_engine_is_running_with_piece() {
        let engine = Engine::new(12345);
        assert_eq!(engine.status(), GameStatus::Running);
        assert!(engine.active().is_some());
        assert_eq!(engine.playfield().occupied_count(), 0);
        assert_eq!(engine.sequencer().len(), 6);
    }

    #[test]
    fn test_first_piece_is_at_spawn_position() {
        let engine = Engine::new(1);
        let piece = engine.active().unwrap();
        assert_eq!(piece, Piece::spawn(piece.shape));
    }

    #[test]
    fn test_tick_below_threshold_waits() {
        let mut engine = engine_with(Piece::spawn(ShapeId::T), 3);
        assert_eq!(engine.tick(), TickOutcome::Waiting);
        assert_eq!(engine.tick(), TickOutcome::Waiting);
        assert_eq!(engine.state().tick_count, 2);
        assert_eq!(engine.tick(), TickOutcome::Fell);
        assert_eq!(engine.state().tick_count, 0);
        assert_eq!(engine.active().unwrap().row, -1);
    }

    #[test]
    fn test_try_shift_blocked_by_wall() {
        let mut engine = engine_with(Piece::spawn(ShapeId::O).moved(0, -4), 36);
        assert_eq!(engine.active().unwrap().col, 0);
        assert!(!engine.try_shift(0, -1));
        assert_eq!(engine.active().unwrap().col, 0);
        assert!(engine.try_shift(0, 1));
    }

    #[test]
    fn test_rotate_commits_rotated_matrix() {
        let mut engine = engine_with(Piece::spawn(ShapeId::T).moved(5, 0), 36);
        assert!(engine.handle_input(Command::Rotate));
        assert_ne!(engine.active().unwrap().matrix, shape(ShapeId::T).matrix);
    }

    #[test]
    fn test_soft_drop_on_floor_locks() {
        let mut engine = engine_with(Piece::spawn(ShapeId::O).moved(20, 0), 36);
        assert!(engine.handle_input(Command::SoftDrop));
        assert_eq!(engine.playfield().occupied_count(), 4);
        assert!(engine.active().is_some());
    }

    #[test]
    fn test_render_skips_buffer_rows() {
        let engine = engine_with(Piece::spawn(ShapeId::I), 36);
        let mut surface = RecordingSurface::default();
        engine.render(&mut surface);

        // I spawns at row -1 with its bar on matrix row 1, so all four cells are on row 0.
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.cells.len(), 4);
        assert!(surface.cells.iter().all(|&(row, _, _)| row == 0));
        assert!(!surface.game_over);
    }
}
