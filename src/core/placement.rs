//! Placement rules - pure predicates over board and piece
//!
//! `can_place` is the single feasibility check; the `*_anywhere` search is
//! exhaustive over every rotation and every origin. Correctness requires no
//! false negatives, so there is deliberately no pruning here.

use crate::core::board::Board;
use crate::core::catalog::{PieceVariant, Shape};

/// Check if a variant fits with its anchor at (origin_x, origin_y).
///
/// Fails on the first offset that lands out of bounds or on a filled cell.
pub fn can_place(board: &Board, variant: &PieceVariant, origin_x: i8, origin_y: i8) -> bool {
    variant
        .offsets()
        .iter()
        .all(|&(dx, dy)| board.is_empty_cell(origin_x + dx, origin_y + dy))
}

/// Check if any rotation of a shape fits anywhere on the board.
///
/// Brute force over rotations x positions; early-out on the first fit.
pub fn can_place_anywhere(board: &Board, shape: &Shape) -> bool {
    shape.variants().iter().any(|variant| {
        (0..board.width() as i8).any(|x| {
            (0..board.height() as i8).any(|y| can_place(board, variant, x, y))
        })
    })
}

/// Enumerate every origin where the variant fits, row-major order.
///
/// Used by preview collaborators; core decision logic goes through
/// `can_place` / `can_place_anywhere`.
pub fn find_valid_positions(board: &Board, variant: &PieceVariant) -> Vec<(i8, i8)> {
    let mut positions = Vec::new();
    for y in 0..board.height() as i8 {
        for x in 0..board.width() as i8 {
            if can_place(board, variant, x, y) {
                positions.push((x, y));
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::PieceCatalog;

    #[test]
    fn test_can_place_respects_bounds_and_occupancy() {
        let catalog = PieceCatalog::standard();
        let mut board = Board::standard();
        board.fill(5, 5);

        let dot = catalog.variant(1, 0).unwrap();
        assert!(!can_place(&board, dot, 5, 5));
        assert!(can_place(&board, dot, 4, 5));
        assert!(can_place(&board, dot, 6, 5));
        assert!(!can_place(&board, dot, 9, 0));
        assert!(!can_place(&board, dot, -1, 0));
    }

    #[test]
    fn test_find_valid_positions_counts() {
        let catalog = PieceCatalog::standard();
        let board = Board::standard();

        let dot = catalog.variant(1, 0).unwrap();
        assert_eq!(find_valid_positions(&board, dot).len(), 81);

        // 3x3 square: 7x7 anchor positions on an empty 9x9 board
        let big = catalog.variant(21, 0).unwrap();
        assert_eq!(find_valid_positions(&board, big).len(), 49);
    }
}
