//! Shapes module - the immutable shape catalog
//!
//! Each of the seven shapes is a square bit-matrix in its canonical (spawn)
//! orientation plus a display color. Matrix sides are 4 for I, 2 for O and 3
//! for everything else; the padding rows/columns are what make clockwise
//! rotation turn a piece about its visual center.
//!
//! Matrix coordinates are `(row, col)` with row 0 at the top.

use crate::types::{Rgb, ShapeId};

/// Largest matrix side in the catalog (the I shape)
pub const MAX_SIDE: usize = 4;

/// Square bit-matrix of side 1..=4, stored as a row-major bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    side: u8,
    bits: u16,
}

impl Matrix {
    /// Build a matrix from 0/1 rows
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N >= 1 && N <= MAX_SIDE);

        let mut bits = 0u16;
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                if rows[r][c] != 0 {
                    bits |= 1u16 << (r * MAX_SIDE + c);
                }
                c += 1;
            }
            r += 1;
        }

        Self {
            side: N as u8,
            bits,
        }
    }

    /// Build a matrix of the given side by evaluating `f(row, col)` for every cell
    ///
    /// Sides above [`MAX_SIDE`] are clamped.
    pub fn from_fn(side: u8, f: impl Fn(u8, u8) -> bool) -> Self {
        let side = side.min(MAX_SIDE as u8);
        let mut bits = 0u16;
        for r in 0..side {
            for c in 0..side {
                if f(r, c) {
                    bits |= 1u16 << Self::bit(r, c);
                }
            }
        }
        Self { side, bits }
    }

    #[inline(always)]
    fn bit(row: u8, col: u8) -> usize {
        row as usize * MAX_SIDE + col as usize
    }

    /// Side length of the square matrix
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Whether the cell at `(row, col)` is occupied; false outside the matrix
    pub fn get(&self, row: u8, col: u8) -> bool {
        row < self.side && col < self.side && self.bits & (1u16 << Self::bit(row, col)) != 0
    }

    /// Occupied cells as `(row, col)` offsets, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let side = self.side;
        (0..side).flat_map(move |r| {
            (0..side)
                .filter(move |&c| self.get(r, c))
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Number of occupied cells
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }
}

/// A catalog entry
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub id: ShapeId,
    pub matrix: Matrix,
    pub color: Rgb,
}

/// The catalog, in [`ShapeId::ALL`] order
pub static SHAPES: [Shape; 7] = [
    Shape {
        id: ShapeId::I,
        matrix: Matrix::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::new(0x00, 0xF0, 0xF0),
    },
    Shape {
        id: ShapeId::J,
        matrix: Matrix::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        color: Rgb::new(0x00, 0x00, 0xF0),
    },
    Shape {
        id: ShapeId::L,
        matrix: Matrix::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        color: Rgb::new(0xF0, 0xA0, 0x00),
    },
    Shape {
        id: ShapeId::O,
        matrix: Matrix::from_rows([[1, 1], [1, 1]]),
        color: Rgb::new(0xF0, 0xF0, 0x00),
    },
    Shape {
        id: ShapeId::S,
        matrix: Matrix::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        color: Rgb::new(0x00, 0xF0, 0x00),
    },
    Shape {
        id: ShapeId::T,
        matrix: Matrix::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        color: Rgb::new(0xA0, 0x00, 0xF0),
    },
    Shape {
        id: ShapeId::Z,
        matrix: Matrix::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        color: Rgb::new(0xF0, 0x00, 0x00),
    },
];

/// Look up a shape by identifier
pub fn shape(id: ShapeId) -> &'static Shape {
    let idx = match id {
        ShapeId::I => 0,
        ShapeId::J => 1,
        ShapeId::L => 2,
        ShapeId::O => 3,
        ShapeId::S => 4,
        ShapeId::T => 5,
        ShapeId::Z => 6,
    };
    &SHAPES[idx]
}

/// Display color for a shape
pub fn color(id: ShapeId) -> Rgb {
    shape(id).color
}
