//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is either empty or holds the
//! color of the piece that settled there. Dimensions are fixed at construction.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x ranges `0..width` (left to right) and y ranges
//! `0..height` (top to bottom).

use crate::types::{Cell, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from rows listed top to bottom.
    ///
    /// Returns `None` when the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = u8::try_from(rows.len()).ok()?;
        let width = u8::try_from(rows.first()?.len()).ok()?;
        if width == 0 || rows.iter().any(|row| row.len() != width as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Count of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Remove every full row at once and pad the top with empty rows.
    ///
    /// Returns the compacted board and the number of rows removed. `self` is left
    /// untouched; the surviving rows keep their relative order.
    pub fn clear_full_lines(&self) -> (Board, u32) {
        let width = self.width as usize;
        let mut kept: Vec<Cell> = Vec::with_capacity(self.cells.len());
        let mut cleared: u32 = 0;

        for row in self.rows() {
            if row.iter().all(|cell| cell.is_some()) {
                cleared += 1;
            } else {
                kept.extend_from_slice(row);
            }
        }

        let mut cells = vec![None; cleared as usize * width];
        cells.extend(kept);

        (
            Board {
                width: self.width,
                height: self.height,
                cells,
            },
            cleared,
        )
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a 2D vector (top to bottom) for snapshots
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
