//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame, and any frame after a size change or `invalidate`, is a
//! full redraw. Later frames only emit the runs of glyphs that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, GlyphStyle};
use crate::types::Rgb;

/// Writes frames to `W` (stdout unless built with [`TerminalRenderer::with_writer`]).
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen, if known
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_scratch()
    }

    /// Undo [`TerminalRenderer::enter`]
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_scratch()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            scratch: Vec::with_capacity(64 * 1024),
        }
    }

    /// Force a full redraw on the next `draw`
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match &self.shown {
            Some(prev) if same_size(prev, fb) => encode_diff_into(prev, fb, &mut self.scratch)?,
            _ => encode_full_into(fb, &mut self.scratch)?,
        }
        self.flush_scratch()?;

        match &mut self.shown {
            Some(prev) => prev.clone_from(fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_scratch(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.run(out, 0, y, fb.row(y))?;
    }
    pen.finish(out)
}

/// Encode only the changed runs between two same-sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in changed_runs(prev, next) {
        let start = x as usize;
        pen.run(out, x, y, &next.row(y)[start..start + len as usize])?;
    }
    pen.finish(out)
}

/// Tracks the style last emitted so runs only switch style when needed.
#[derive(Default)]
struct Pen {
    style: Option<GlyphStyle>,
}

impl Pen {
    fn run(&mut self, out: &mut Vec<u8>, x: u16, y: u16, glyphs: &[Glyph]) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for glyph in glyphs {
            if self.style != Some(glyph.style) {
                apply_style(out, glyph.style)?;
                self.style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn apply_style(out: &mut Vec<u8>, style: GlyphStyle) -> Result<()> {
    out.queue(SetForegroundColor(truecolor(style.fg)))?
        .queue(SetBackgroundColor(truecolor(style.bg)))?
        .queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn truecolor(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Maximal runs `(x, y, len)` of glyphs that differ between two frames.
///
/// Frames of different sizes are treated as entirely changed.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    if !same_size(prev, next) {
        return (0..next.height()).map(|y| (0, y, next.width())).collect();
    }

    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut open: Option<u16> = None;
        for (x, (a, b)) in (0u16..).zip(prev.row(y).iter().zip(next.row(y))) {
            match (a == b, open) {
                (false, None) => open = Some(x),
                (true, Some(start)) => {
                    runs.push((start, y, x - start));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            runs.push((start, y, next.width() - start));
        }
    }
    runs
}
