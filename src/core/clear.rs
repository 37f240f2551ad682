//! Clear engine - row, column, and 3x3 block clear detection
//!
//! Detection and application are split: callers score and animate from the
//! `ClearResult` before mutating the board, and preview-only callers never
//! mutate at all. A result holds concrete coordinates, not a re-derivable
//! predicate, so it must be applied to the same board state it was detected
//! on.

use crate::core::board::Board;
use crate::types::BLOCK_SIZE;

/// Outcome of one clear scan. Transient: computed and consumed within a
/// single turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearResult {
    /// Cleared row indices, ascending
    pub rows: Vec<u8>,
    /// Cleared column indices, ascending
    pub columns: Vec<u8>,
    /// Cleared 3x3 block coordinates (block_x, block_y)
    pub blocks: Vec<(u8, u8)>,
    /// Union of all affected cells, row-major order, each listed once
    pub cells: Vec<(u8, u8)>,
    /// Rows + columns + blocks, each counted independently
    pub total_lines: u32,
}

impl ClearResult {
    pub fn has_clears(&self) -> bool {
        self.total_lines > 0
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Check if every cell of a row is filled
pub fn is_row_full(board: &Board, y: i8) -> bool {
    (0..board.width() as i8).all(|x| board.is_filled(x, y))
}

/// Check if every cell of a column is filled
pub fn is_column_full(board: &Board, x: i8) -> bool {
    (0..board.height() as i8).all(|y| board.is_filled(x, y))
}

/// Check if the 3x3 region anchored at (start_x, start_y) is filled
pub fn is_block_full(board: &Board, start_x: i8, start_y: i8) -> bool {
    (0..BLOCK_SIZE as i8)
        .all(|dy| (0..BLOCK_SIZE as i8).all(|dx| board.is_filled(start_x + dx, start_y + dy)))
}

/// Scan for fully occupied rows, columns, and (optionally) 3x3 blocks.
///
/// Block clearing applies only on a 9x9 board, partitioned into nine fixed
/// blocks anchored at (bx*3, by*3). A cell covered by several simultaneous
/// clears is accumulated once.
pub fn detect_clears(board: &Board, include_blocks: bool) -> ClearResult {
    let width = board.width() as usize;
    let height = board.height() as usize;
    let mut result = ClearResult::default();
    let mut marked = vec![false; width * height];

    for y in 0..height {
        if is_row_full(board, y as i8) {
            result.rows.push(y as u8);
            for x in 0..width {
                marked[y * width + x] = true;
            }
        }
    }

    for x in 0..width {
        if is_column_full(board, x as i8) {
            result.columns.push(x as u8);
            for y in 0..height {
                marked[y * width + x] = true;
            }
        }
    }

    if include_blocks && board.width() == 9 && board.height() == 9 {
        for block_y in 0..3u8 {
            for block_x in 0..3u8 {
                let start_x = block_x * BLOCK_SIZE;
                let start_y = block_y * BLOCK_SIZE;
                if is_block_full(board, start_x as i8, start_y as i8) {
                    result.blocks.push((block_x, block_y));
                    for dy in 0..BLOCK_SIZE as usize {
                        for dx in 0..BLOCK_SIZE as usize {
                            let x = start_x as usize + dx;
                            let y = start_y as usize + dy;
                            marked[y * width + x] = true;
                        }
                    }
                }
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            if marked[y * width + x] {
                result.cells.push((x as u8, y as u8));
            }
        }
    }

    result.total_lines =
        (result.rows.len() + result.columns.len() + result.blocks.len()) as u32;
    result
}

/// Empty every cell accumulated by `detect_clears`.
///
/// Must run against the same board state the result was detected on; a
/// board mutated in between is a contract violation, caught in debug builds
/// by asserting each accumulated cell is still filled.
pub fn apply_clears(board: &mut Board, result: &ClearResult) {
    for &(x, y) in &result.cells {
        debug_assert!(
            board.is_filled(x as i8, y as i8),
            "stale ClearResult: cell ({x}, {y}) is no longer filled"
        );
        board.clear_cell(x as i8, y as i8);
    }
}
