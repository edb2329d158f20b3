//! TerminalSurface: the engine's render surface, backed by a framebuffer.
//!
//! This module is pure (no I/O). Each playfield cell maps to a
//! `CELL_W` x `CELL_H` block of glyphs inside a bordered frame that is centered
//! in the viewport.

use crate::engine::Surface;
use crate::fb::{FrameBuffer, GlyphStyle};
use crate::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const GAME_OVER_TEXT: &str = "GAME OVER!";

/// Terminal columns and rows per playfield cell; two columns keep cells
/// roughly square in typical terminal fonts.
const CELL_W: u16 = 2;
const CELL_H: u16 = 1;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Framebuffer-backed [`Surface`].
pub struct TerminalSurface {
    fb: FrameBuffer,
    viewport: Viewport,
}

impl TerminalSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
        }
    }

    /// Takes effect at the next `clear_surface`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Outer frame `(x, y, w, h)`, border included
    fn frame_rect(&self) -> (u16, u16, u16, u16) {
        let w = (BOARD_WIDTH as u16) * CELL_W + 2;
        let h = (BOARD_HEIGHT as u16) * CELL_H + 2;
        let x = self.viewport.width.saturating_sub(w) / 2;
        let y = self.viewport.height.saturating_sub(h) / 2;
        (x, y, w, h)
    }

    fn draw_border(&mut self, x: u16, y: u16, w: u16, h: u16) {
        let style = GlyphStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        self.fb.set(x, y, style.glyph('┌'));
        self.fb.set(x + w - 1, y, style.glyph('┐'));
        self.fb.set(x, y + h - 1, style.glyph('└'));
        self.fb.set(x + w - 1, y + h - 1, style.glyph('┘'));

        for dx in 1..w - 1 {
            self.fb.set(x + dx, y, style.glyph('─'));
            self.fb.set(x + dx, y + h - 1, style.glyph('─'));
        }
        for dy in 1..h - 1 {
            self.fb.set(x, y + dy, style.glyph('│'));
            self.fb.set(x + w - 1, y + dy, style.glyph('│'));
        }
    }

    fn fill_cell(&mut self, row: u16, col: u16, ch: char, style: GlyphStyle) {
        let (x, y, _, _) = self.frame_rect();
        let px = x + 1 + col * CELL_W;
        let py = y + 1 + row * CELL_H;
        self.fb.fill_rect(px, py, CELL_W, CELL_H, style.glyph(ch));
    }
}

impl Surface for TerminalSurface {
    fn clear_surface(&mut self) {
        self.fb.resize(self.viewport.width, self.viewport.height);
        self.fb.fill(GlyphStyle::default().glyph(' '));

        let (x, y, w, h) = self.frame_rect();
        self.draw_border(x, y, w, h);

        let dot = GlyphStyle {
            dim: true,
            ..GlyphStyle::new(Rgb::new(90, 90, 100), FIELD_BG)
        };
        for row in 0..BOARD_HEIGHT as u16 {
            for col in 0..BOARD_WIDTH as u16 {
                self.fill_cell(row, col, '·', dot);
            }
        }
    }

    fn draw_cell(&mut self, row: i8, col: i8, color: Rgb) {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return;
        }
        let style = GlyphStyle {
            bold: true,
            ..GlyphStyle::new(color, FIELD_BG)
        };
        self.fill_cell(row as u16, col as u16, '█', style);
    }

    fn draw_game_over_overlay(&mut self) {
        let (x, y, w, h) = self.frame_rect();
        let mid_y = y.saturating_add(h / 2);

        let bar = GlyphStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        self.fb.fill_rect(x + 1, mid_y.saturating_sub(1), w - 2, 3, bar.glyph(' '));

        let text_w = GAME_OVER_TEXT.chars().count() as u16;
        let text_x = x.saturating_add(w.saturating_sub(text_w) / 2);
        let text = GlyphStyle { bold: true, ..bar };
        self.fb.put_str(text_x, mid_y, GAME_OVER_TEXT, text);
    }
}
