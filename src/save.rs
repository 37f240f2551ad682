//! Save snapshot - the engine's only wire format
//!
//! A flat value the external persistence collaborator serializes however it
//! likes (the serde derives make JSON trivial). The engine produces and
//! consumes it; it never touches storage itself.

use serde::{Deserialize, Serialize};

use crate::types::Piece;

pub const SAVE_VERSION: u32 = 1;

/// Snapshot of an in-progress game: board occupancy as a flat 0/1 array in
/// row-major order, the tray as (shape_id, rotation_index) pairs with None
/// for consumed slots, and the scoring/RNG state needed to resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub grid_width: u8,
    pub grid_height: u8,
    pub board: Vec<u8>,
    pub tray: Vec<Option<(u16, u8)>>,
    pub score: u32,
    pub combo: u32,
    pub level: u32,
    pub total_clears: u32,
    pub rng_state: u32,
}

impl SaveState {
    /// Tray slots as piece handles, preserving empty slots
    pub fn tray_pieces(&self) -> Vec<Option<Piece>> {
        self.tray
            .iter()
            .map(|slot| slot.map(|(id, rotation)| Piece::new(id, rotation)))
            .collect()
    }
}
