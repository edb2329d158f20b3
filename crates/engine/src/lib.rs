//! Game engine: state machine, render interface, and frame scheduling.
//!
//! - [`engine`]: [`Engine`] owns the game state; gravity on tick, input handling,
//!   locking, line clears, game over
//! - [`surface`]: the [`Surface`] render collaborator and a recording double
//! - [`schedule`]: [`Scheduler`] abstraction with manual and interval implementations
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Engine, RecordingSurface};
//! use blockfall_engine::types::Command;
//!
//! let mut engine = Engine::new(12345);
//! let mut surface = RecordingSurface::default();
//!
//! engine.handle_input(Command::MoveLeft);
//! engine.step(&mut surface);
//!
//! assert!(!engine.is_game_over());
//! ```

pub mod engine;
pub mod schedule;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use engine::{Engine, EngineConfig, EngineState, GameStatus, TickOutcome};
pub use schedule::{
    frame_task, IntervalScheduler, ManualScheduler, Scheduler, Task, TaskHandle, TaskStatus,
};
pub use surface::{RecordingSurface, Surface};
