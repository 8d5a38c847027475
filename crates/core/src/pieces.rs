//! Pieces module - catalog shapes and clockwise rotation
//!
//! Every piece is an occupancy matrix (rows top to bottom) plus a fixed color.
//! Catalog entries are `const` and never mutated; rotation always builds a new
//! matrix. There are no wall kicks: a rotation either fits at the current anchor
//! or is rejected by the caller.

use arrayvec::ArrayVec;

use crate::types::{Color, PieceKind};

/// Largest matrix side any piece uses
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a single occupied cell relative to the shape's top-left anchor
pub type CellOffset = (i16, i16);

/// Occupied cells of a shape, stack-only
pub type CellOffsets = ArrayVec<CellOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Occupancy matrix of up to 4x4 cells.
///
/// Entries outside `rows x cols` are always zero, so derived equality compares
/// only the meaningful part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a zero-padded matrix.
    pub const fn new(rows: u8, cols: u8, bits: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        Self { rows, cols, bits }
    }

    /// Build a shape from rows of 0/1 entries.
    ///
    /// Returns `None` for ragged, empty or oversized input. Any non-zero entry
    /// counts as occupied.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM
            || width == 0
            || width > MAX_SHAPE_DIM
            || rows.iter().any(|row| row.len() != width)
        {
            return None;
        }

        let mut bits = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                bits[y][x] = u8::from(cell != 0);
            }
        }
        Some(Self::new(height as u8, width as u8, bits))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether local cell (x, y) is occupied; false outside the matrix.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.cols as usize && y < self.rows as usize && self.bits[y][x] != 0
    }

    /// Local `(dx, dy)` offsets of every occupied cell, row by row.
    pub fn occupied(&self) -> CellOffsets {
        let mut out = CellOffsets::new();
        for y in 0..self.rows as usize {
            for x in 0..self.cols as usize {
                if self.bits[y][x] != 0 {
                    out.push((x as i16, y as i16));
                }
            }
        }
        out
    }

    /// Copy out as a row-major 0/1 matrix.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|y| self.bits[y][..self.cols as usize].to_vec())
            .collect()
    }
}

/// Rotate a matrix 90° clockwise.
///
/// Row `i` of the result is column `i` of the input read bottom to top, which
/// is the same as transposing and then reversing every row.
pub fn rotate_shape(shape: &Shape) -> Shape {
    let rows = shape.rows as usize;
    let cols = shape.cols as usize;
    let mut bits = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

    for (i, out_row) in bits.iter_mut().enumerate().take(cols) {
        for (j, out) in out_row.iter_mut().enumerate().take(rows) {
            *out = shape.bits[rows - 1 - j][i];
        }
    }

    Shape::new(shape.cols, shape.rows, bits)
}

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

const I_DEF: PieceDef = PieceDef {
    kind: PieceKind::I,
    shape: Shape::new(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
    color: Color::rgb(0x0EA5E9),
};

const O_DEF: PieceDef = PieceDef {
    kind: PieceKind::O,
    shape: Shape::new(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    color: Color::rgb(0xF97316),
};

const T_DEF: PieceDef = PieceDef {
    kind: PieceKind::T,
    shape: Shape::new(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    color: Color::rgb(0x8B5CF6),
};

const S_DEF: PieceDef = PieceDef {
    kind: PieceKind::S,
    shape: Shape::new(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    color: Color::rgb(0xD946EF),
};

const Z_DEF: PieceDef = PieceDef {
    kind: PieceKind::Z,
    shape: Shape::new(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    color: Color::rgb(0x1EAEDB),
};

const J_DEF: PieceDef = PieceDef {
    kind: PieceKind::J,
    shape: Shape::new(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    color: Color::rgb(0x33C3F0),
};

const L_DEF: PieceDef = PieceDef {
    kind: PieceKind::L,
    shape: Shape::new(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    color: Color::rgb(0xEA384C),
};

/// Catalog entry for a piece kind
pub fn definition(kind: PieceKind) -> &'static PieceDef {
    match kind {
        PieceKind::I => &I_DEF,
        PieceKind::O => &O_DEF,
        PieceKind::T => &T_DEF,
        PieceKind::S => &S_DEF,
        PieceKind::Z => &Z_DEF,
        PieceKind::J => &J_DEF,
        PieceKind::L => &L_DEF,
    }
}

/// Canonical (spawn) orientation of a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    definition(kind).shape
}

/// Spawn anchor for a board of the given width: horizontally centered, top row.
pub fn spawn_position(board_width: u8) -> (i16, i16) {
    (board_width as i16 / 2 - 1, 0)
}
