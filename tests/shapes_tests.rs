//! Shape catalog, rotation and spawn tests

use blockfall::core::{rotate_clockwise, shape, spawn_position, Matrix, Piece, SHAPES};
use blockfall::types::ShapeId;

#[test]
fn test_catalog_covers_every_shape_in_order() {
    let ids: Vec<ShapeId> = SHAPES.iter().map(|s| s.id).collect();
    assert_eq!(ids, ShapeId::ALL.to_vec());
    for s in &SHAPES {
        assert_eq!(s.matrix.count(), 4, "{:?} should have four cells", s.id);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for id in ShapeId::ALL {
        let start = shape(id).matrix;
        let mut m = start;
        for _ in 0..4 {
            m = rotate_clockwise(&m);
        }
        assert_eq!(m, start, "{:?}", id);
    }
}

#[test]
fn test_rotation_preserves_cell_count_and_side() {
    for id in ShapeId::ALL {
        let m = shape(id).matrix;
        let r = rotate_clockwise(&m);
        assert_eq!(r.side(), m.side());
        assert_eq!(r.count(), m.count());
    }
}

#[test]
fn test_t_rotates_clockwise() {
    let rotated = rotate_clockwise(&shape(ShapeId::T).matrix);
    assert_eq!(rotated, Matrix::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]));
}

#[test]
fn test_o_rotation_is_unchanged() {
    let o = shape(ShapeId::O).matrix;
    assert_eq!(rotate_clockwise(&o), o);
}

#[test]
fn test_i_turns_vertical_in_column_two() {
    let rotated = rotate_clockwise(&shape(ShapeId::I).matrix);
    let cells: Vec<(i8, i8)> = rotated.cells().collect();
    assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_spawn_positions() {
    assert_eq!(spawn_position(ShapeId::I), (-1, 3));
    assert_eq!(spawn_position(ShapeId::O), (-2, 4));
    for id in [ShapeId::J, ShapeId::L, ShapeId::S, ShapeId::T, ShapeId::Z] {
        assert_eq!(spawn_position(id), (-2, 3), "{:?}", id);
    }
}

#[test]
fn test_spawn_heights() {
    for id in ShapeId::ALL {
        let piece = Piece::spawn(id);
        let top = piece.cells().map(|(row, _)| row).min().unwrap();
        let expected = if id == ShapeId::I { 0 } else { -2 };
        assert_eq!(top, expected, "{:?}", id);
    }
}
