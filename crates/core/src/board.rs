//! Board module - manages the game grid
//!
//! The board is a 10x16 grid of signed cells (see `term_tetris_types` for the
//! sign encoding). Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..15
//! (top to bottom).

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;

/// The game board - 10 columns x 16 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Check if position is outside the grid
    pub fn is_out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8
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

    /// Check if position holds a settled (locked) block
    pub fn is_settled(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c > 0)
    }

    /// One row of the board, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// A row is complete when it has no empty cell
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    /// Remove row `y` by moving every row from `top` to `y - 1` one step down,
    /// then emptying row 0.
    ///
    /// Rows above `top` are expected to be empty, so they are not touched.
    pub fn collapse_row(&mut self, y: usize, top: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        for row in (top.max(1)..=y).rev() {
            let src = (row - 1) * WIDTH;
            self.cells.copy_within(src..src + WIDTH, row * WIDTH);
        }
        self.cells[..WIDTH].fill(0);
    }

    /// Number of cells belonging to the falling piece
    pub fn falling_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c < 0).count()
    }

    /// Number of settled cells
    pub fn settled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Build a board from rows of text, bottom-aligned.
    ///
    /// `.` is empty, digits `1`-`7` are settled blocks. Handy for setting up
    /// puzzles and test positions.
    ///
    /// ```
    /// use term_tetris_core::Board;
    ///
    /// let board = Board::from_rows(&["1111111.11"]);
    /// assert_eq!(board.get(0, 15), Some(1));
    /// assert_eq!(board.get(7, 15), Some(0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = offset + i;
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let cell = ch.to_digit(10).map(|d| d as Cell).unwrap_or(0);
                board.cells[y * WIDTH + x] = cell;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
