//! Game configuration - the tunables collaborators hand to the engine
//!
//! An opaque-to-collaborators bag of options; unrecognized concerns
//! (rendering, economy, ads) live with their owners, not here.

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_PIECES_PER_SET};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Grid
    pub grid_width: u8,
    pub grid_height: u8,
    pub enable_3x3_block_clears: bool,

    // Piece generation
    pub pieces_per_set: usize,
    pub difficulty_scaling_start_level: u32,
    pub small_piece_base_weight: f32,
    pub large_piece_max_weight: f32,

    // Scoring
    pub points_per_tile: u32,
    pub points_per_clear: u32,
    pub perfect_clear_bonus: u32,
    pub combo_multiplier_increment: f32,
    pub max_combo_multiplier: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            enable_3x3_block_clears: true,
            pieces_per_set: DEFAULT_PIECES_PER_SET,
            difficulty_scaling_start_level: 10,
            small_piece_base_weight: 0.6,
            large_piece_max_weight: 0.5,
            points_per_tile: 1,
            points_per_clear: 10,
            perfect_clear_bonus: 100,
            combo_multiplier_increment: 0.1,
            max_combo_multiplier: 3.0,
        }
    }
}
