//! Game session - headless turn orchestrator
//!
//! Owns the board, the tray, and the generator, and drives one placement
//! turn end to end: validate, fill, score, clear, refill, game-over check.
//! Collaborators that own their loop (a UI, a solver) can instead use the
//! board/catalog/placement/clear/game_over functions directly; the session
//! is the reference wiring of those pieces.

use thiserror::Error;

use crate::config::GameConfig;
use crate::core::board::{Board, SnapshotError};
use crate::core::catalog::{OffsetList, PieceCatalog};
use crate::core::clear::{apply_clears, detect_clears, ClearResult};
use crate::core::game_over::is_game_over;
use crate::core::generator::PieceGenerator;
use crate::core::placement::can_place;
use crate::core::scoring::{clear_bonus, perfect_clear_bonus, placement_points};
use crate::save::{SaveState, SAVE_VERSION};
use crate::types::{Piece, PieceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("game is already over")]
    GameOver,
    #[error("tray slot {0} is out of range")]
    SlotOutOfRange(usize),
    #[error("tray slot {0} is empty")]
    SlotEmpty(usize),
    #[error("shape id {0} is not in the catalog")]
    UnknownPiece(PieceId),
    #[error("piece does not fit at ({0}, {1})")]
    DoesNotFit(i8, i8),
}

/// What one successful placement produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Total points awarded: placement + clear bonus + perfect-clear bonus
    pub points: u32,
    /// The clear scan result, when the placement triggered clears
    pub clears: Option<ClearResult>,
    /// The clears left the board completely empty
    pub perfect_clear: bool,
    /// No remaining piece fits anywhere after this turn
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    catalog: PieceCatalog,
    board: Board,
    tray: Vec<Option<Piece>>,
    generator: PieceGenerator,
    score: u32,
    combo: u32,
    total_clears: u32,
    game_over: bool,
}

impl GameSession {
    /// Start a fresh game: empty board, first tray drawn, game-over state
    /// evaluated.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut generator = PieceGenerator::new(seed);
        generator.configure(&config);

        let mut session = Self {
            board: Board::new(config.grid_width, config.grid_height),
            catalog: PieceCatalog::standard(),
            tray: Vec::new(),
            generator,
            score: 0,
            combo: 0,
            total_clears: 0,
            game_over: false,
            config,
        };
        session.refill_tray();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Tray slots; consumed slots are None until the next refill
    pub fn tray(&self) -> &[Option<Piece>] {
        &self.tray
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn level(&self) -> u32 {
        self.generator.level()
    }

    pub fn total_clears(&self) -> u32 {
        self.total_clears
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Forwarded to the generator's difficulty ramp
    pub fn set_level(&mut self, level: u32) {
        self.generator.set_level(level);
    }

    /// Place the piece in `slot` with its anchor at (x, y).
    ///
    /// On success the board is mutated, clears are applied, the slot is
    /// consumed, and the tray refills once every slot is used.
    pub fn place_piece(
        &mut self,
        slot: usize,
        x: i8,
        y: i8,
    ) -> Result<PlacementOutcome, PlacementError> {
        if self.game_over {
            return Err(PlacementError::GameOver);
        }
        let piece = *self
            .tray
            .get(slot)
            .ok_or(PlacementError::SlotOutOfRange(slot))?;
        let piece = piece.ok_or(PlacementError::SlotEmpty(slot))?;
        let variant = self
            .catalog
            .resolve(piece)
            .ok_or(PlacementError::UnknownPiece(piece.shape_id))?;

        if !can_place(&self.board, variant, x, y) {
            return Err(PlacementError::DoesNotFit(x, y));
        }

        // Copy out of the catalog borrow before mutating the board
        let offsets: OffsetList = variant.offsets().iter().copied().collect();
        for &(dx, dy) in &offsets {
            self.board.fill(x + dx, y + dy);
        }

        let mut points = placement_points(offsets.len(), &self.config);

        let result = detect_clears(&self.board, self.config.enable_3x3_block_clears);
        let mut perfect_clear = false;
        let clears = if result.has_clears() {
            points += clear_bonus(
                result.rows.len(),
                result.columns.len(),
                result.blocks.len(),
                self.combo,
                &self.config,
            );
            self.combo += 1;
            self.total_clears += result.total_lines;
            apply_clears(&mut self.board, &result);

            if self.board.is_empty() {
                perfect_clear = true;
                points += perfect_clear_bonus(&self.config);
            }
            Some(result)
        } else {
            self.combo = 0;
            None
        };

        self.score += points;
        self.tray[slot] = None;

        if self.tray.iter().all(Option::is_none) {
            self.refill_tray();
        } else {
            self.check_game_over();
        }

        Ok(PlacementOutcome {
            points,
            clears,
            perfect_clear,
            game_over: self.game_over,
        })
    }

    /// Rotate the piece in `slot` one step clockwise through its variant
    /// cycle. The last variant wraps back to rotation 0.
    pub fn rotate_piece(&mut self, slot: usize) -> Result<(), PlacementError> {
        let piece = *self
            .tray
            .get(slot)
            .ok_or(PlacementError::SlotOutOfRange(slot))?;
        let piece = piece.ok_or(PlacementError::SlotEmpty(slot))?;
        let count = self.catalog.rotation_count(piece.shape_id);
        if count == 0 {
            return Err(PlacementError::UnknownPiece(piece.shape_id));
        }
        self.tray[slot] = Some(Piece::new(
            piece.shape_id,
            ((piece.rotation_index as usize + 1) % count) as u8,
        ));
        Ok(())
    }

    /// Produce the resumable snapshot of this session
    pub fn save(&self) -> SaveState {
        SaveState {
            version: SAVE_VERSION,
            grid_width: self.board.width(),
            grid_height: self.board.height(),
            board: self.board.to_snapshot(),
            tray: self
                .tray
                .iter()
                .map(|slot| slot.map(|p| (p.shape_id, p.rotation_index)))
                .collect(),
            score: self.score,
            combo: self.combo,
            level: self.generator.level(),
            total_clears: self.total_clears,
            rng_state: self.generator.rng_state(),
        }
    }

    /// Restore a previously saved session.
    ///
    /// Tray pieces with an id unknown to the catalog are dropped to empty
    /// slots. A board snapshot of the wrong length leaves the session
    /// untouched and reports the mismatch.
    pub fn restore(&mut self, state: &SaveState) -> Result<(), SnapshotError> {
        let mut board = Board::new(state.grid_width, state.grid_height);
        board.load_snapshot(&state.board)?;
        self.board = board;

        self.tray = state
            .tray_pieces()
            .into_iter()
            .map(|slot| slot.filter(|p| self.catalog.shape(p.shape_id).is_some()))
            .collect();
        self.score = state.score;
        self.combo = state.combo;
        self.total_clears = state.total_clears;
        self.generator.set_level(state.level);
        self.generator.restore_rng_state(state.rng_state);
        self.check_game_over();
        Ok(())
    }

    fn refill_tray(&mut self) {
        let pieces = self.generator.generate_piece_set(
            self.config.pieces_per_set,
            &self.catalog,
            Some(&self.board),
        );
        self.tray = pieces.into_iter().map(Some).collect();
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        let available: Vec<Piece> = self.tray.iter().flatten().copied().collect();
        self.game_over = is_game_over(&self.board, &self.catalog, &available);
    }
}
