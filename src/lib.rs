//! Deterministic rule engine for a 9x9 block-placement puzzle.
//!
//! Place polyomino pieces on a board, clear full rows, columns, and 3x3
//! regions, and detect when no further move is possible. Everything is
//! synchronous, single-threaded, and replayable from a seed; rendering,
//! input, and persistence are external collaborators.

pub mod config;
pub mod core;
pub mod save;
pub mod types;

pub use crate::config::GameConfig;
pub use crate::core::{Board, GameSession, PieceCatalog};
pub use crate::save::SaveState;
pub use crate::types::{Piece, PieceId, SizeClass};
