//! Terminal surface tests - engine frames rendered into a framebuffer

use blockfall::core::{Piece, Playfield, Sequencer};
use blockfall::engine::{Engine, EngineConfig, EngineState, Surface};
use blockfall::term::{encode_full_into, TerminalSurface, Viewport};
use blockfall::types::ShapeId;

fn engine_with(playfield: Playfield, active: Piece) -> Engine {
    let state = EngineState {
        playfield,
        active: Some(active),
        ..EngineState::new()
    };
    Engine::from_state(EngineConfig::default(), state, Sequencer::seeded(3))
}

#[test]
fn test_empty_field_is_dotted_inside_border() {
    let engine = engine_with(Playfield::new(), Piece::spawn(ShapeId::O));
    let mut surface = TerminalSurface::new(Viewport::new(22, 22));
    engine.render(&mut surface);

    let fb = surface.frame();
    assert_eq!(fb.row_text(0), format!("┌{}┐", "─".repeat(20)));
    assert_eq!(fb.row_text(21), format!("└{}┘", "─".repeat(20)));
    for y in 1..=20 {
        assert_eq!(fb.row_text(y), format!("│{}│", "·".repeat(20)), "row {}", y);
    }
}

#[test]
fn test_active_piece_on_row_zero_is_drawn() {
    let engine = engine_with(Playfield::new(), Piece::spawn(ShapeId::I));
    let mut surface = TerminalSurface::new(Viewport::new(22, 22));
    engine.render(&mut surface);

    let expected = format!("│{}{}{}│", "·".repeat(6), "█".repeat(8), "·".repeat(6));
    assert_eq!(surface.frame().row_text(1), expected);
}

#[test]
fn test_locked_cells_use_shape_color() {
    let mut field = Playfield::new();
    field.set(19, 9, Some(ShapeId::Z));
    let engine = engine_with(field, Piece::spawn(ShapeId::O));

    let mut surface = TerminalSurface::new(Viewport::new(22, 22));
    engine.render(&mut surface);

    let glyph = surface.frame().get(19, 20).unwrap();
    assert_eq!(glyph.ch, '█');
    assert_eq!(glyph.style.fg, blockfall::core::color(ShapeId::Z));
}

#[test]
fn test_game_over_overlay_text() {
    let mut field = Playfield::new();
    for row in 0..20 {
        field.set(row, 4, Some(ShapeId::S));
        field.set(row, 5, Some(ShapeId::S));
    }
    let mut engine = engine_with(field, Piece::spawn(ShapeId::O));
    let mut surface = TerminalSurface::new(Viewport::new(40, 30));

    engine.step(&mut surface);
    assert!(engine.is_game_over());

    let fb = surface.frame();
    assert!((0..fb.height()).any(|y| fb.row_text(y).contains("GAME OVER!")));

    let mut out = Vec::new();
    encode_full_into(fb, &mut out).unwrap();
    assert!(String::from_utf8_lossy(&out).contains("GAME OVER!"));
}

#[test]
fn test_viewport_change_applies_on_next_frame() {
    let engine = engine_with(Playfield::new(), Piece::spawn(ShapeId::T));
    let mut surface = TerminalSurface::new(Viewport::new(22, 22));
    engine.render(&mut surface);

    surface.set_viewport(Viewport::new(60, 30));
    assert_eq!(surface.frame().width(), 22);

    engine.render(&mut surface);
    assert_eq!((surface.frame().width(), surface.frame().height()), (60, 30));
}

#[test]
fn test_surface_trait_object() {
    let mut surface = TerminalSurface::new(Viewport::new(22, 22));
    let dyn_surface: &mut dyn Surface = &mut surface;
    dyn_surface.clear_surface();
    dyn_surface.draw_cell(0, 0, blockfall::core::color(ShapeId::L));
    assert_eq!(surface.frame().row_text(1).chars().nth(1), Some('█'));
}
