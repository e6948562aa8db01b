//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..19 (top to bottom).
//! Rows above the top edge (negative rows) are treated as open space.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows removed by one clear (a real piece clears at most 4).
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by [`Board::clear_full_rows`], bottom to top.
pub type ClearedRows = ArrayVec<usize, MAX_CLEARED_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check whether a single cell may hold part of a piece.
    ///
    /// Columns must be inside the board and rows above the floor. Negative rows
    /// are free space above the visible board.
    pub fn is_free(&self, col: i8, row: i8) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
            return false;
        }
        row < 0 || !self.is_occupied(col, row)
    }

    /// Check whether `shape` fits with its top-left corner at (col, row).
    pub fn is_valid_position(&self, shape: &Shape, col: i8, row: i8) -> bool {
        shape
            .offsets()
            .all(|(dc, dr)| self.is_free(col + dc, row + dr))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shift every row above it down by one and blank the top row.
    pub fn clear_row(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges.
        for r in (1..=row).rev() {
            let src_start = (r - 1) * width;
            let dst_start = r * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(None);
    }

    /// Clear all full rows and return their original indices, bottom to top.
    ///
    /// Rows are scanned from the floor upwards. After a removal the same index
    /// is examined again, since the rows above have shifted into it.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut row = BOARD_HEIGHT as usize;

        while row > 0 {
            let y = row - 1;
            if self.is_row_full(y) {
                // Every earlier removal shifted this row down by one.
                cleared.push(y - cleared.len());
                self.clear_row(y);
                continue;
            }
            row -= 1;
        }

        cleared
    }

    /// Write `kind` into every cell of `shape` placed at (col, row).
    ///
    /// Cells above the board are dropped. Returns false when any cell was
    /// dropped that way.
    pub fn lock_shape(&mut self, shape: &Shape, col: i8, row: i8, kind: PieceKind) -> bool {
        let mut all_on_board = true;
        for (dc, dr) in shape.offsets() {
            let r = row + dr;
            if r < 0 {
                all_on_board = false;
                continue;
            }
            self.set(col + dc, r, Some(kind));
        }
        all_on_board
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export the board as compact piece codes (0 = empty).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map_or(0, |k| k.code());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill every column of `row` except those in `gaps`.
    pub fn fill_row(&mut self, row: i8, kind: PieceKind, gaps: &[i8]) {
        for col in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&col) {
                self.set(col, row, Some(kind));
            }
        }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                let start = y * width;
                self.cells[start..start + width].to_vec()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
