//! Piece catalog - polyomino shapes with precomputed rotations
//!
//! Every shape registers once with its base offsets; the catalog normalizes
//! them, generates the unique 90-degree clockwise rotations up front, and
//! stores them as a contiguous variant array per shape. No rotation math
//! happens during gameplay.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Piece, PieceId, SizeClass, TileOffset, MAX_PIECE_TILES};

/// Offsets of one rotation variant, normalized and sorted
pub type OffsetList = ArrayVec<TileOffset, MAX_PIECE_TILES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("shape id {0} is already registered")]
    DuplicateId(PieceId),
    #[error("shape id {0} has no offsets")]
    EmptyShape(PieceId),
    #[error("shape id {id} has {tiles} tiles, maximum is {MAX_PIECE_TILES}")]
    TooManyTiles { id: PieceId, tiles: usize },
}

/// One rotation of a shape.
///
/// Offsets are normalized so min-x and min-y are both 0, and sorted by
/// (y, x) so structurally equal variants compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceVariant {
    shape_id: PieceId,
    rotation_index: u8,
    size_class: SizeClass,
    offsets: OffsetList,
}

impl PieceVariant {
    pub fn shape_id(&self) -> PieceId {
        self.shape_id
    }

    pub fn rotation_index(&self) -> u8 {
        self.rotation_index
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn offsets(&self) -> &[TileOffset] {
        &self.offsets
    }

    pub fn tile_count(&self) -> usize {
        self.offsets.len()
    }

    /// Handle for this variant, as stored in trays and save snapshots
    pub fn as_piece(&self) -> Piece {
        Piece::new(self.shape_id, self.rotation_index)
    }

    /// Bounding-box width in cells
    pub fn width(&self) -> i8 {
        self.offsets.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1
    }

    /// Bounding-box height in cells
    pub fn height(&self) -> i8 {
        self.offsets.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1
    }
}

/// A registered shape and its full rotation cycle
#[derive(Debug, Clone)]
pub struct Shape {
    id: PieceId,
    name: String,
    variants: Vec<PieceVariant>,
}

impl Shape {
    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rotation variants; index equals rotation index
    pub fn variants(&self) -> &[PieceVariant] {
        &self.variants
    }

    pub fn rotation_count(&self) -> usize {
        self.variants.len()
    }

    pub fn tile_count(&self) -> usize {
        self.variants[0].tile_count()
    }

    pub fn size_class(&self) -> SizeClass {
        self.variants[0].size_class
    }
}

/// Registry of shapes, immutable once built.
///
/// Constructed explicitly (no global state) and handed by reference to the
/// generator, validators, and oracle.
#[derive(Debug, Clone, Default)]
pub struct PieceCatalog {
    /// Sorted by id for binary-search lookup
    shapes: Vec<Shape>,
    small_ids: Vec<PieceId>,
    medium_ids: Vec<PieceId>,
    large_ids: Vec<PieceId>,
}

impl PieceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape and precompute its unique rotations.
    ///
    /// Offsets may be in any order and at any origin; they are normalized
    /// before rotation generation. Symmetric shapes end up with a single
    /// variant, fully asymmetric ones with four.
    pub fn register_shape(
        &mut self,
        id: PieceId,
        name: &str,
        offsets: &[TileOffset],
    ) -> Result<(), CatalogError> {
        if offsets.is_empty() {
            return Err(CatalogError::EmptyShape(id));
        }
        if offsets.len() > MAX_PIECE_TILES {
            return Err(CatalogError::TooManyTiles {
                id,
                tiles: offsets.len(),
            });
        }
        let slot = match self.shapes.binary_search_by_key(&id, |s| s.id) {
            Ok(_) => return Err(CatalogError::DuplicateId(id)),
            Err(slot) => slot,
        };

        let size_class = SizeClass::from_tile_count(offsets.len());
        let base = normalize(offsets.iter().copied().collect());

        // Generate successive 90-degree clockwise rotations, stopping at the
        // first structural duplicate. Yields 1, 2, or 4 variants.
        let mut cycles: Vec<OffsetList> = vec![base];
        loop {
            let next = normalize(rotated_cw(cycles.last().unwrap()));
            if cycles.contains(&next) {
                break;
            }
            cycles.push(next);
        }

        let variants = cycles
            .into_iter()
            .enumerate()
            .map(|(i, offsets)| PieceVariant {
                shape_id: id,
                rotation_index: i as u8,
                size_class,
                offsets,
            })
            .collect();

        self.shapes.insert(
            slot,
            Shape {
                id,
                name: name.to_string(),
                variants,
            },
        );
        match size_class {
            SizeClass::Small => self.small_ids.push(id),
            SizeClass::Medium => self.medium_ids.push(id),
            SizeClass::Large => self.large_ids.push(id),
        }
        Ok(())
    }

    /// Number of registered shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Look up a shape by id
    pub fn shape(&self, id: PieceId) -> Option<&Shape> {
        self.shapes
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|i| &self.shapes[i])
    }

    /// Look up a rotation variant.
    ///
    /// The rotation index wraps modulo the shape's cycle length, negative
    /// indices included, so rotating past the last variant cycles back to 0.
    pub fn variant(&self, id: PieceId, rotation_index: i32) -> Option<&PieceVariant> {
        let shape = self.shape(id)?;
        let count = shape.variants.len() as i32;
        let index = rotation_index.rem_euclid(count) as usize;
        Some(&shape.variants[index])
    }

    /// Resolve a tray piece handle to its variant
    pub fn resolve(&self, piece: Piece) -> Option<&PieceVariant> {
        self.variant(piece.shape_id, piece.rotation_index as i32)
    }

    /// Number of unique rotations for a shape (0 if unknown)
    pub fn rotation_count(&self, id: PieceId) -> usize {
        self.shape(id).map_or(0, |s| s.variants.len())
    }

    /// All rotation variants of a shape
    pub fn variants(&self, id: PieceId) -> Option<&[PieceVariant]> {
        self.shape(id).map(|s| s.variants.as_slice())
    }

    /// Shape ids in a size category, in registration order
    pub fn ids_by_size_class(&self, class: SizeClass) -> &[PieceId] {
        match class {
            SizeClass::Small => &self.small_ids,
            SizeClass::Medium => &self.medium_ids,
            SizeClass::Large => &self.large_ids,
        }
    }

    /// All registered shape ids, ascending
    pub fn all_ids(&self) -> Vec<PieceId> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    /// Iterate all registered shapes, ascending by id
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// The fixed 27-shape registry shipped with the game: dot through the
    /// 3x3 square.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for &(id, name, offsets) in STANDARD_SHAPES {
            catalog
                .register_shape(id, name, offsets)
                .expect("standard catalog shape table is valid");
        }
        catalog
    }
}

/// 90-degree clockwise rotation: (x, y) -> (y, -x)
fn rotated_cw(offsets: &[TileOffset]) -> OffsetList {
    offsets.iter().map(|&(x, y)| (y, -x)).collect()
}

/// Shift offsets so min-x and min-y are 0, then sort by (y, x) so that
/// structural equality is plain slice equality
fn normalize(mut offsets: OffsetList) -> OffsetList {
    let min_x = offsets.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = offsets.iter().map(|&(_, y)| y).min().unwrap_or(0);
    for (x, y) in &mut offsets {
        *x -= min_x;
        *y -= min_y;
    }
    offsets.sort_unstable_by_key(|&(x, y)| (y, x));
    offsets
}

/// Predefined shape table (ids are stable, referenced by save snapshots)
const STANDARD_SHAPES: &[(PieceId, &str, &[TileOffset])] = &[
    // Small (1-2 tiles)
    (1, "Dot", &[(0, 0)]),
    (2, "Domino", &[(0, 0), (1, 0)]),
    // Medium (3-4 tiles)
    (3, "L-Tromino", &[(0, 0), (1, 0), (0, 1)]),
    (4, "I-Tromino", &[(0, 0), (1, 0), (2, 0)]),
    (5, "O-Tetromino", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    (6, "T-Tetromino", &[(0, 0), (1, 0), (2, 0), (1, 1)]),
    (7, "S-Tetromino", &[(1, 0), (2, 0), (0, 1), (1, 1)]),
    (8, "Z-Tetromino", &[(0, 0), (1, 0), (1, 1), (2, 1)]),
    (9, "L-Tetromino", &[(0, 0), (0, 1), (0, 2), (1, 0)]),
    (10, "J-Tetromino", &[(1, 0), (1, 1), (1, 2), (0, 0)]),
    (11, "I-Tetromino", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    // Large (5+ tiles)
    (12, "Plus", &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]),
    (13, "U-Pentomino", &[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)]),
    (14, "I-Pentomino", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    (15, "L-Pentomino", &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0)]),
    (16, "T-Pentomino", &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)]),
    (17, "W-Pentomino", &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]),
    (18, "Z-Pentomino", &[(0, 2), (1, 2), (1, 1), (1, 0), (2, 0)]),
    (19, "P-Pentomino", &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2)]),
    (20, "F-Pentomino", &[(1, 0), (0, 1), (1, 1), (1, 2), (2, 2)]),
    (
        21,
        "Big-Square",
        &[
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ],
    ),
    (
        22,
        "Large-L",
        &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (2, 0)],
    ),
    (23, "Corner", &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)]),
    (24, "Y-Pentomino", &[(0, 1), (1, 0), (1, 1), (1, 2), (1, 3)]),
    (25, "N-Pentomino", &[(0, 0), (0, 1), (1, 1), (1, 2), (1, 3)]),
    (26, "V-Pentomino", &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]),
    (27, "X-Pentomino", &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]),
];
