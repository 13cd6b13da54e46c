//! Grid module - manages the playfield
//!
//! The grid is a 10x20 matrix where each cell is empty or holds a color token.
//! Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, Color, GridCells, COLS, ROWS};

/// Total number of cells on the grid
const GRID_SIZE: usize = (COLS as usize) * (ROWS as usize);

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a grid from a conformant occupancy matrix, painting occupied cells with `color`
    pub fn from_occupancy(rows: &[[bool; COLS as usize]; ROWS as usize], color: Color) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &occupied) in row.iter().enumerate() {
                if occupied {
                    grid.cells[y * COLS as usize + x] = Some(color);
                }
            }
        }
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= COLS as i8 || y < 0 || y >= ROWS as i8 {
            return None;
        }
        Some((y as usize) * (COLS as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        COLS
    }

    pub fn height(&self) -> u8 {
        ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_none()))
    }

    fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= ROWS as usize {
            return None;
        }
        let start = y * COLS as usize;
        Some(&self.cells[start..start + COLS as usize])
    }

    /// True when no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Index of the topmost row holding at least one filled cell
    pub fn topmost_occupied_row(&self) -> Option<usize> {
        (0..ROWS as usize).find(|&y| !self.is_row_empty(y))
    }

    /// Write the piece color into every cell covered by the piece.
    ///
    /// Sub-cells outside the grid are skipped; callers check collision first.
    pub fn merge_piece(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Fullness is judged on the grid as it was before this call: the scan runs
    /// bottom to top and the write cursor never passes the read cursor, so a
    /// row is always tested before anything is copied over it.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, { ROWS as usize }> {
        let mut cleared_rows = ArrayVec::new();
        let width = COLS as usize;
        let mut write_y = ROWS as usize;

        for read_y in (0..ROWS as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Refill the vacated rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a row-major 2D array (for snapshots and events)
    pub fn to_rows(&self) -> GridCells {
        let mut out = [[None; COLS as usize]; ROWS as usize];
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * COLS as usize;
            row.copy_from_slice(&self.cells[start..start + COLS as usize]);
        }
        out
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GridCells> for Grid {
    fn from(rows: GridCells) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let start = y * COLS as usize;
            grid.cells[start..start + COLS as usize].copy_from_slice(row);
        }
        grid
    }
}
