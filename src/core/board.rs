//! Board module - manages the puzzle grid
//!
//! The board is a W x H occupancy grid (canonically 9x9) stored as a flat
//! array for cache locality. Coordinates: (x, y) with x ranging left to
//! right and y top to bottom, row-major index `y * W + x`.
//!
//! Out-of-bounds queries report "filled", never "empty". Placement and
//! search code relies on this so it never special-cases edges.

use std::fmt;

use thiserror::Error;

use crate::types::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

/// Error raised when a board snapshot cannot be applied.
///
/// The board is left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot length mismatch: expected {expected} cells, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// The puzzle board - occupancy grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board with the given dimensions
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Create a new empty board with the canonical 9x9 dimensions
    pub fn standard() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if (x, y) lies inside the grid
    pub fn is_valid_position(&self, x: i8, y: i8) -> bool {
        x >= 0 && x < self.width as i8 && y >= 0 && y < self.height as i8
    }

    /// Check if a cell is filled.
    ///
    /// Out of bounds counts as filled: the edge behaves like a permanently
    /// occupied border.
    #[inline]
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        match self.index(x, y) {
            Some(idx) => self.cells[idx],
            None => true,
        }
    }

    /// Check if a cell is empty (false out of bounds)
    #[inline]
    pub fn is_empty_cell(&self, x: i8, y: i8) -> bool {
        !self.is_filled(x, y)
    }

    /// Set a cell's filled flag.
    /// Returns false (and leaves the board unchanged) if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, filled: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = filled;
                true
            }
            None => false,
        }
    }

    /// Mark a cell as filled
    pub fn fill(&mut self, x: i8, y: i8) -> bool {
        self.set(x, y, true)
    }

    /// Mark a cell as empty
    pub fn clear_cell(&mut self, x: i8, y: i8) -> bool {
        self.set(x, y, false)
    }

    /// Reset all cells to empty
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = false;
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True if no cell is filled
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// True if every cell is filled
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c)
    }

    /// Serialize to a flat 0/1 array in row-major order (`index = y*W + x`)
    pub fn to_snapshot(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| u8::from(c)).collect()
    }

    /// Restore occupancy from a flat 0/1 array.
    ///
    /// A snapshot of the wrong length leaves the board untouched and
    /// reports the mismatch. Any nonzero value counts as filled.
    pub fn load_snapshot(&mut self, data: &[u8]) -> Result<(), SnapshotError> {
        let expected = self.cells.len();
        if data.len() != expected {
            return Err(SnapshotError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        for (cell, &value) in self.cells.iter_mut().zip(data) {
            *cell = value != 0;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i8 {
            for x in 0..self.width as i8 {
                f.write_str(if self.is_filled(x, y) { "X" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
