//! Catalog tests - rotation precomputation and the standard shape registry

use block_puzzle_core::core::PieceCatalog;
use block_puzzle_core::types::{Piece, SizeClass};

#[test]
fn test_standard_catalog_has_27_shapes() {
    let catalog = PieceCatalog::standard();
    assert_eq!(catalog.len(), 27);
    assert_eq!(catalog.all_ids(), (1..=27).collect::<Vec<_>>());
}

#[test]
fn test_rotation_counts_for_known_shapes() {
    let catalog = PieceCatalog::standard();

    // Fully symmetric shapes collapse to a single variant
    assert_eq!(catalog.rotation_count(1), 1, "Dot");
    assert_eq!(catalog.rotation_count(5), 1, "O-Tetromino");
    assert_eq!(catalog.rotation_count(12), 1, "Plus");
    assert_eq!(catalog.rotation_count(21), 1, "Big-Square");
    assert_eq!(catalog.rotation_count(27), 1, "X-Pentomino");

    // 180-degree symmetric shapes have two
    assert_eq!(catalog.rotation_count(2), 2, "Domino");
    assert_eq!(catalog.rotation_count(4), 2, "I-Tromino");
    assert_eq!(catalog.rotation_count(7), 2, "S-Tetromino");
    assert_eq!(catalog.rotation_count(8), 2, "Z-Tetromino");
    assert_eq!(catalog.rotation_count(11), 2, "I-Tetromino");
    assert_eq!(catalog.rotation_count(14), 2, "I-Pentomino");
    assert_eq!(catalog.rotation_count(18), 2, "Z-Pentomino");

    // Asymmetric shapes get the full cycle
    assert_eq!(catalog.rotation_count(3), 4, "L-Tromino");
    assert_eq!(catalog.rotation_count(6), 4, "T-Tetromino");
    assert_eq!(catalog.rotation_count(13), 4, "U-Pentomino");
    assert_eq!(catalog.rotation_count(22), 4, "Large-L");
    assert_eq!(catalog.rotation_count(23), 4, "Corner");
}

#[test]
fn test_unknown_shape_queries() {
    let catalog = PieceCatalog::standard();
    assert!(catalog.shape(99).is_none());
    assert!(catalog.variant(99, 0).is_none());
    assert!(catalog.variants(99).is_none());
    assert_eq!(catalog.rotation_count(99), 0);
    assert!(catalog.resolve(Piece::new(99, 0)).is_none());
}

#[test]
fn test_full_cycle_returns_to_first_variant() {
    let catalog = PieceCatalog::standard();
    for &id in &catalog.all_ids() {
        let count = catalog.rotation_count(id) as i32;
        assert_eq!(
            catalog.variant(id, count),
            catalog.variant(id, 0),
            "shape {} cycle should wrap",
            id
        );
    }
}

#[test]
fn test_variants_are_normalized() {
    let catalog = PieceCatalog::standard();
    for shape in catalog.shapes() {
        for variant in shape.variants() {
            let offsets = variant.offsets();
            let min_x = offsets.iter().map(|&(x, _)| x).min().unwrap();
            let min_y = offsets.iter().map(|&(_, y)| y).min().unwrap();
            assert_eq!((min_x, min_y), (0, 0), "shape {} not normalized", shape.id());

            let mut sorted = offsets.to_vec();
            sorted.sort_by_key(|&(x, y)| (y, x));
            assert_eq!(offsets, sorted.as_slice(), "shape {} not sorted", shape.id());
        }
    }
}

#[test]
fn test_variants_are_structurally_distinct() {
    let catalog = PieceCatalog::standard();
    for shape in catalog.shapes() {
        let variants = shape.variants();
        for (i, a) in variants.iter().enumerate() {
            for b in &variants[i + 1..] {
                assert_ne!(a.offsets(), b.offsets(), "shape {} has duplicate variants", shape.id());
            }
        }
    }
}

#[test]
fn test_size_class_partition() {
    let catalog = PieceCatalog::standard();
    let small = catalog.ids_by_size_class(SizeClass::Small);
    let medium = catalog.ids_by_size_class(SizeClass::Medium);
    let large = catalog.ids_by_size_class(SizeClass::Large);

    assert_eq!(small, &[1, 2]);
    assert_eq!(medium, &[3, 4, 5, 6, 7, 8, 9, 10, 11]);
    assert_eq!(large.len(), 16);
    assert_eq!(small.len() + medium.len() + large.len(), 27);

    for &id in small {
        assert!(catalog.shape(id).unwrap().tile_count() <= 2);
    }
    for &id in medium {
        let tiles = catalog.shape(id).unwrap().tile_count();
        assert!((3..=4).contains(&tiles));
    }
    for &id in large {
        assert!(catalog.shape(id).unwrap().tile_count() >= 5);
    }
}

#[test]
fn test_domino_rotation_geometry() {
    let catalog = PieceCatalog::standard();
    let horizontal = catalog.variant(2, 0).unwrap();
    assert_eq!(horizontal.offsets(), &[(0, 0), (1, 0)]);
    assert_eq!((horizontal.width(), horizontal.height()), (2, 1));

    let vertical = catalog.variant(2, 1).unwrap();
    assert_eq!(vertical.offsets(), &[(0, 0), (0, 1)]);
    assert_eq!((vertical.width(), vertical.height()), (1, 2));
}

#[test]
fn test_negative_rotation_index_wraps() {
    let catalog = PieceCatalog::standard();
    let count = catalog.rotation_count(6) as i32;
    assert_eq!(count, 4);
    assert_eq!(catalog.variant(6, -1), catalog.variant(6, 3));
    assert_eq!(catalog.variant(6, -4), catalog.variant(6, 0));
    assert_eq!(catalog.variant(6, 7), catalog.variant(6, 3));
}

#[test]
fn test_registration_order_does_not_matter_for_lookup() {
    let mut catalog = PieceCatalog::new();
    catalog.register_shape(10, "Ten", &[(0, 0)]).unwrap();
    catalog.register_shape(2, "Two", &[(0, 0), (1, 0)]).unwrap();
    catalog.register_shape(7, "Seven", &[(0, 0), (1, 1)]).unwrap();

    assert_eq!(catalog.all_ids(), vec![2, 7, 10]);
    assert_eq!(catalog.shape(7).unwrap().name(), "Seven");
}
