//! Terminal-state oracle - exhaustive game-over detection
//!
//! MANDATORY: never rely on heuristics here. A false positive ends a run
//! unfairly, a false negative softlocks it, so every piece is checked in
//! every rotation at every position.

use std::fmt::Write as _;

use log::debug;

use crate::core::board::Board;
use crate::core::catalog::PieceCatalog;
use crate::core::placement::can_place_anywhere;
use crate::types::Piece;

/// Check whether no available piece fits anywhere on the board.
///
/// An empty piece slice is not game over: the round has not ended and the
/// caller is expected to refill the tray before re-checking. Pieces with an
/// id unknown to the catalog are skipped. Cost is
/// O(pieces x rotations x W x H x tiles) by contract.
pub fn is_game_over(board: &Board, catalog: &PieceCatalog, pieces: &[Piece]) -> bool {
    if pieces.is_empty() {
        return false;
    }

    for piece in pieces {
        let Some(shape) = catalog.shape(piece.shape_id) else {
            debug!("game-over scan: skipping unknown shape id {}", piece.shape_id);
            continue;
        };
        if can_place_anywhere(board, shape) {
            return false;
        }
    }

    true
}

/// Diagnostic report of per-piece placeability.
///
/// Not part of the gameplay contract; meant for logs and bug reports.
pub fn explain_game_over(board: &Board, catalog: &PieceCatalog, pieces: &[Piece]) -> String {
    let mut report = String::new();
    let _ = writeln!(
        report,
        "board fill: {}/{}",
        board.filled_count(),
        board.width() as usize * board.height() as usize
    );

    if pieces.is_empty() {
        report.push_str("no pieces available (not game over)\n");
        return report;
    }

    for piece in pieces {
        match catalog.shape(piece.shape_id) {
            Some(shape) => {
                let verdict = if can_place_anywhere(board, shape) {
                    "CAN place"
                } else {
                    "CANNOT place"
                };
                let _ = writeln!(report, "- {} (id:{}): {}", shape.name(), shape.id(), verdict);
            }
            None => {
                let _ = writeln!(report, "- unknown shape id {} (skipped)", piece.shape_id);
            }
        }
    }

    report
}
