//! Piece-set generator - weighted random draws with difficulty scaling
//!
//! All randomness flows through one seedable LCG so a given seed reproduces
//! an identical sequence of piece batches. Required for deterministic
//! daily-challenge puzzles shared across players.

use log::debug;

use crate::config::GameConfig;
use crate::core::board::Board;
use crate::core::catalog::PieceCatalog;
use crate::core::placement::can_place_anywhere;
use crate::types::{
    Piece, SizeClass, DIFFICULTY_RAMP_LEVELS, LARGE_PIECE_BASE_WEIGHT, SMALL_WEIGHT_FLOOR,
    SMALL_WEIGHT_MAX_DROP,
};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Rebuild from an exact raw state (save-snapshot restore)
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current raw state, as embedded in save snapshots
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32, a=1664525, c=1013904223
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Generate a uniform value in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits keep the full f32 mantissa precision
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Weighted piece generator with a difficulty ramp.
///
/// State is three tunables plus a level and the seeded RNG; drawing is the
/// only other mutation.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Lcg,
    level: u32,
    small_weight: f32,
    large_max_weight: f32,
    difficulty_start_level: u32,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Lcg::new(seed),
            level: 1,
            small_weight: 0.6,
            large_max_weight: 0.5,
            difficulty_start_level: 10,
        }
    }

    /// Apply the generation tunables from a game config
    pub fn configure(&mut self, config: &GameConfig) {
        self.set_difficulty_params(
            config.small_piece_base_weight,
            config.large_piece_max_weight,
            config.difficulty_scaling_start_level,
        );
    }

    /// Reset the RNG to a fresh seed
    pub fn set_seed(&mut self, seed: u32) {
        self.rng = Lcg::new(seed);
    }

    pub fn set_difficulty_params(
        &mut self,
        small_weight: f32,
        large_max_weight: f32,
        difficulty_start_level: u32,
    ) {
        self.small_weight = small_weight;
        self.large_max_weight = large_max_weight;
        self.difficulty_start_level = difficulty_start_level;
    }

    /// Set the current difficulty level (clamped to >= 1)
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Raw RNG word for save snapshots
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Restore the exact RNG word from a save snapshot
    pub fn restore_rng_state(&mut self, state: u32) {
        self.rng = Lcg::from_state(state);
    }

    /// Current (small, medium, large) category weights; they sum to 1.
    ///
    /// Below the scaling threshold the configured base weights hold. Above
    /// it, the large weight ramps linearly toward its maximum over 20
    /// levels, the small weight drops by up to 0.3 (floored at 0.2), and
    /// medium absorbs the remainder.
    pub fn category_weights(&self) -> (f32, f32, f32) {
        let mut small = self.small_weight;
        let mut large = LARGE_PIECE_BASE_WEIGHT;

        if self.level > self.difficulty_start_level {
            let progress = ((self.level - self.difficulty_start_level) as f32
                / DIFFICULTY_RAMP_LEVELS)
                .min(1.0);
            large = lerp(LARGE_PIECE_BASE_WEIGHT, self.large_max_weight, progress);
            small = (self.small_weight - progress * SMALL_WEIGHT_MAX_DROP).max(SMALL_WEIGHT_FLOOR);
        }

        let medium = 1.0 - small - large;
        (small, medium, large)
    }

    /// Draw one piece: weighted category, then uniform shape, then uniform
    /// rotation variant.
    ///
    /// Returns None only for an empty catalog. An empty chosen category
    /// falls back to the full catalog.
    pub fn generate_single_piece(&mut self, catalog: &PieceCatalog) -> Option<Piece> {
        if catalog.is_empty() {
            return None;
        }

        let (small, medium, _) = self.category_weights();
        let roll = self.rng.next_f32();
        let class = if roll < small {
            SizeClass::Small
        } else if roll < small + medium {
            SizeClass::Medium
        } else {
            SizeClass::Large
        };

        let ids = catalog.ids_by_size_class(class);
        let all_ids;
        let ids = if ids.is_empty() {
            all_ids = catalog.all_ids();
            &all_ids[..]
        } else {
            ids
        };

        let shape_id = ids[self.rng.next_range(ids.len() as u32) as usize];
        let rotation_count = catalog.rotation_count(shape_id) as u32;
        let rotation_index = self.rng.next_range(rotation_count) as u8;

        Some(Piece::new(shape_id, rotation_index))
    }

    /// Draw a batch of `count` pieces.
    ///
    /// When a board is supplied and none of the drawn pieces fits anywhere
    /// on it, the first placeable small or medium shape is substituted into
    /// slot 0. Large shapes are never searched for the substitute: they are
    /// the least likely to rescue a nearly-full board and the most
    /// expensive to scan. If no substitute exists either, the batch is
    /// returned unmodified and the terminal-state check downstream ends the
    /// game.
    pub fn generate_piece_set(
        &mut self,
        count: usize,
        catalog: &PieceCatalog,
        board: Option<&Board>,
    ) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = (0..count)
            .filter_map(|_| self.generate_single_piece(catalog))
            .collect();

        if let Some(board) = board {
            if !pieces.is_empty() && !has_placeable_piece(board, catalog, &pieces) {
                match find_placeable_piece(board, catalog) {
                    Some(substitute) => {
                        debug!(
                            "piece-set fallback: substituting shape id {} into slot 0",
                            substitute.shape_id
                        );
                        pieces[0] = substitute;
                    }
                    None => {
                        debug!("piece-set fallback: no placeable small/medium shape exists");
                    }
                }
            }
        }

        pieces
    }
}

fn has_placeable_piece(board: &Board, catalog: &PieceCatalog, pieces: &[Piece]) -> bool {
    pieces.iter().any(|piece| {
        catalog
            .shape(piece.shape_id)
            .is_some_and(|shape| can_place_anywhere(board, shape))
    })
}

/// Find a placeable piece, scanning small shapes first, then medium.
///
/// Returns the rotation-0 handle of the first shape with any placeable
/// rotation.
pub fn find_placeable_piece(board: &Board, catalog: &PieceCatalog) -> Option<Piece> {
    for class in [SizeClass::Small, SizeClass::Medium] {
        for &id in catalog.ids_by_size_class(class) {
            let Some(shape) = catalog.shape(id) else {
                continue;
            };
            if can_place_anywhere(board, shape) {
                return Some(Piece::new(id, 0));
            }
        }
    }
    None
}
