//! Pieces module - the shape catalog and matrix rotation.
//!
//! Shapes are immutable rectangular boolean matrices drawn from a fixed
//! catalog of 7 templates. Rotation never mutates: it produces a new matrix
//! with transposed dimensions via `rotated[j][rows - 1 - i] = original[i][j]`.

use crate::types::PieceKind;

/// Largest shape dimension in the catalog (the I piece spans 4 columns).
pub const MAX_SHAPE_DIM: u8 = 4;

const SHAPE_CELLS: usize = (MAX_SHAPE_DIM as usize) * (MAX_SHAPE_DIM as usize);

/// A piece shape: a rows x cols boolean matrix in row-major flat storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [bool; SHAPE_CELLS],
}

impl Shape {
    pub(crate) fn from_rows(rows_2d: &[&[bool]]) -> Self {
        let rows = rows_2d.len() as u8;
        let cols = rows_2d[0].len() as u8;
        debug_assert!(rows <= MAX_SHAPE_DIM && cols <= MAX_SHAPE_DIM);
        debug_assert!(rows_2d.iter().all(|r| r.len() == cols as usize));

        let mut cells = [false; SHAPE_CELLS];
        for (i, row) in rows_2d.iter().enumerate() {
            for (j, &filled) in row.iter().enumerate() {
                cells[i * cols as usize + j] = filled;
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the matrix cell (i, j) is occupied.
    pub fn is_filled(&self, i: u8, j: u8) -> bool {
        if i >= self.rows || j >= self.cols {
            return false;
        }
        self.cells[i as usize * self.cols as usize + j as usize]
    }

    /// Iterate the occupied cells as (row, col) offsets from the anchor.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |i| {
            (0..self.cols).filter_map(move |j| self.is_filled(i, j).then_some((i as i8, j as i8)))
        })
    }

    /// Return this shape rotated 90 degrees clockwise.
    ///
    /// Dimensions transpose; applying this four times reproduces the original.
    pub fn rotated_cw(&self) -> Shape {
        let rows = self.cols;
        let cols = self.rows;
        let mut cells = [false; SHAPE_CELLS];

        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.is_filled(i, j) {
                    let ri = j as usize;
                    let rj = (self.rows - 1 - i) as usize;
                    cells[ri * cols as usize + rj] = true;
                }
            }
        }

        Shape { rows, cols, cells }
    }
}

impl PieceKind {
    /// The spawn-orientation template for this piece.
    ///
    /// Geometry is a fixed constant table, not derived.
    pub fn template(self) -> Shape {
        const X: bool = true;
        const O: bool = false;
        match self {
            PieceKind::I => Shape::from_rows(&[&[X, X, X, X]]),
            PieceKind::J => Shape::from_rows(&[&[X, X, X], &[X, O, O]]),
            PieceKind::L => Shape::from_rows(&[&[X, X, X], &[O, O, X]]),
            PieceKind::O => Shape::from_rows(&[&[X, X], &[X, X]]),
            PieceKind::T => Shape::from_rows(&[&[X, X, X], &[O, X, O]]),
            PieceKind::S => Shape::from_rows(&[&[O, X, X], &[X, X, O]]),
            PieceKind::Z => Shape::from_rows(&[&[X, X, O], &[O, X, X]]),
        }
    }
}
