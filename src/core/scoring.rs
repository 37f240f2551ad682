//! Scoring module - placement points, clear bonuses, perfect clears
//!
//! Pure functions over the `GameConfig` tunables. Combo state is owned by
//! the caller (the session or an external game loop); these functions only
//! read it.

use crate::config::GameConfig;
use crate::types::MULTI_CLEAR_MULTIPLIERS;

/// Points for placing a piece: one unit per tile
pub fn placement_points(tile_count: usize, config: &GameConfig) -> u32 {
    tile_count as u32 * config.points_per_tile
}

/// Bonus for a clear scan.
///
/// `combo` is the number of consecutive clearing placements before this
/// one. Base points scale with the total line count; the combo multiplier
/// is clamped at the configured maximum; simultaneous multi-clears apply a
/// stepped multiplier on top. Result is rounded to nearest.
pub fn clear_bonus(rows: usize, columns: usize, blocks: usize, combo: u32, config: &GameConfig) -> u32 {
    let total_lines = rows + columns + blocks;
    if total_lines == 0 {
        return 0;
    }

    let base_points = total_lines as u32 * config.points_per_clear;

    let combo_multiplier = (1.0 + combo as f32 * config.combo_multiplier_increment)
        .min(config.max_combo_multiplier);

    let multi_clear_multiplier = match total_lines {
        0 | 1 => 1.0,
        2 => MULTI_CLEAR_MULTIPLIERS[0],
        3 => MULTI_CLEAR_MULTIPLIERS[1],
        _ => MULTI_CLEAR_MULTIPLIERS[2],
    };

    (base_points as f32 * combo_multiplier * multi_clear_multiplier).round() as u32
}

/// Flat bonus when a clear leaves the board completely empty
pub fn perfect_clear_bonus(config: &GameConfig) -> u32 {
    config.perfect_clear_bonus
}
