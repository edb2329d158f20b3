//! Terminal rendering for the game.
//!
//! Renders into a simple framebuffer that is flushed to a terminal backend,
//! instead of drawing straight to the terminal from the engine.
//!
//! - [`surface`]: [`TerminalSurface`] implements the engine's `Surface`
//! - [`fb`]: framebuffer of styled glyphs
//! - [`renderer`]: flushes frames to the terminal with crossterm, diffing
//!   against the previous frame

pub mod fb;
pub mod renderer;
pub mod surface;

pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{TerminalSurface, Viewport};
