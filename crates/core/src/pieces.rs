//! Pieces module - Tetromino shape matrices and clockwise rotation
//!
//! Every kind is a small boolean matrix. Rotation is a clockwise transpose of
//! the current matrix; when the rotated matrix does not fit, a single kick
//! table of horizontal offsets shared by all kinds is tried in order.

use crate::types::{PieceKind, BOARD_WIDTH, WALL_KICKS};

/// Largest side of any shape matrix.
pub const MAX_SIDE: usize = 4;

/// Occupancy matrix of a piece orientation.
///
/// Only the top-left `rows` x `cols` corner of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SIDE]; MAX_SIDE],
}

impl Shape {
    /// Build a shape from rows of `#` (filled) and any other char (empty).
    ///
    /// Patterns larger than 4x4 are truncated.
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        let rows = pattern.len().min(MAX_SIDE);
        let mut cols = 0;
        for (r, line) in pattern.iter().take(MAX_SIDE).enumerate() {
            for (c, ch) in line.chars().take(MAX_SIDE).enumerate() {
                cells[r][c] = ch == '#';
                cols = cols.max(c + 1);
            }
        }
        Self {
            rows: rows as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// (col, row) offsets of the occupied cells, row-major.
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.offsets().count()
    }

    /// Rotate 90° clockwise: `rotated[c][rows - 1 - r] = original[r][c]`.
    pub fn rotate_cw(&self) -> Self {
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        let rows = self.rows as usize;
        for r in 0..rows {
            for c in 0..self.cols as usize {
                cells[c][rows - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Get the spawn matrix for a piece kind
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_pattern(&["####"]),
        PieceKind::O => Shape::from_pattern(&["##", "##"]),
        PieceKind::T => Shape::from_pattern(&[".#.", "###"]),
        PieceKind::S => Shape::from_pattern(&[".##", "##."]),
        PieceKind::Z => Shape::from_pattern(&["##.", ".##"]),
        PieceKind::J => Shape::from_pattern(&["#..", "###"]),
        PieceKind::L => Shape::from_pattern(&["..#", "###"]),
    }
}

/// Column that centers `shape` horizontally on the board.
pub fn spawn_column(shape: &Shape) -> i8 {
    ((BOARD_WIDTH as i8) - shape.cols() as i8) / 2
}

/// Try to rotate a shape clockwise with wall kicks
///
/// The kicked position keeps `row` and shifts `col` by each entry of
/// [`WALL_KICKS`] in order. Returns the rotated shape and the accepted column,
/// or `None` when no offset fits.
pub fn try_rotate(
    shape: &Shape,
    col: i8,
    row: i8,
    mut is_valid: impl FnMut(&Shape, i8, i8) -> bool,
) -> Option<(Shape, i8)> {
    let rotated = shape.rotate_cw();

    WALL_KICKS
        .iter()
        .map(|&dc| col + dc)
        .find(|&c| is_valid(&rotated, c, row))
        .map(|c| (rotated, c))
}
