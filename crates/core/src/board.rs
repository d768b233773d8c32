//! Board module - manages the game grid
//!
//! The board is a `width` x `height` grid (10x20 by default) where each cell
//! can be empty or filled with a piece kind. Uses a flat row-major vector for
//! cache locality; rows are only ever moved wholesale, so every row keeps
//! exactly `width` cells.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the board (y < 0) are never out of bounds for collision tests,
//! which lets pieces enter from above.
//!
//! The board only stores locked cells. The falling piece belongs to the game
//! controller and is projected here with [`Board::place_shape`] when it locks.

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Widest or tallest board whose coordinates still fit in an `i8`.
pub const MAX_SIDE: u8 = i8::MAX as u8;

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the default 10x20 dimensions
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with the given dimensions, capped at [`MAX_SIDE`]
    pub fn with_size(width: u8, height: u8) -> Self {
        let width = width.min(MAX_SIDE);
        let height = height.min(MAX_SIDE);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
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
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
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

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Check whether `shape` with its origin at (x, y) collides.
    ///
    /// A collision is any occupied cell left of column 0, right of the last
    /// column, below the last row, or on top of a filled cell. Cells above
    /// row 0 never collide.
    pub fn check_collision(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().any(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= self.width as i8 || py >= self.height as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Fill every in-bounds cell of `shape` at (x, y) with `kind`.
    ///
    /// Offsets outside the board are clipped.
    pub fn place_shape(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Empty every in-bounds cell of `shape` at (x, y). Inverse of [`Board::place_shape`].
    pub fn clear_shape(&mut self, shape: &Shape, x: i8, y: i8) {
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, None);
        }
    }

    /// Number of rows `shape` can fall from (x, y) before it would collide.
    ///
    /// Terminates because every shape has an occupied cell in its top row,
    /// which collides with the floor once it passes the last row.
    pub fn drop_distance(&self, shape: &Shape, x: i8, y: i8) -> u8 {
        let mut distance: u8 = 0;
        while !self.check_collision(shape, x, y + distance as i8 + 1) {
            distance += 1;
        }
        distance
    }

    /// Row slice for `y` (panics on out-of-range rows, callers pass board rows)
    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Lowest full row, scanning bottom to top.
    pub fn first_full_row(&self) -> Option<usize> {
        (0..self.height as usize).rev().find(|&y| self.is_row_full(y))
    }

    /// Columns of row `y` that hold a filled cell, left to right.
    pub fn filled_columns(&self, y: usize) -> Vec<u8> {
        if y >= self.height as usize {
            return Vec::new();
        }
        self.row(y)
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(|(x, _)| x as u8)
            .collect()
    }

    /// Clear a row and shift all rows above down
    ///
    /// Row `r` takes the contents of row `r - 1` for every `r <= y`, then row 0
    /// is replaced by an empty row. Returns the number of lines cleared (1 or 0).
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        1
    }

    /// Count of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Create from a 2D vector (rows top to bottom)
    ///
    /// Returns None when the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0
            || width > MAX_SIDE as usize
            || height > MAX_SIDE as usize
            || rows.iter().any(|row| row.len() != width)
        {
            return None;
        }
        Some(Self {
            width: u8::try_from(width).ok()?,
            height: u8::try_from(height).ok()?,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Convert to 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height as usize)
            .map(|y| self.row(y).to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
