//! Session tests - full turns: placement, scoring, clears, refill, restore

use block_puzzle_core::core::{find_valid_positions, GameSession, PlacementError};
use block_puzzle_core::save::{SaveState, SAVE_VERSION};
use block_puzzle_core::{Board, GameConfig};

fn state_with(board: &Board, tray: &[Option<(u16, u8)>]) -> SaveState {
    SaveState {
        version: SAVE_VERSION,
        grid_width: board.width(),
        grid_height: board.height(),
        board: board.to_snapshot(),
        tray: tray.to_vec(),
        score: 0,
        combo: 0,
        level: 1,
        total_clears: 0,
        rng_state: 12345,
    }
}

/// First slot with a piece and the first origin its current variant fits
fn first_fit(session: &GameSession) -> Option<(usize, i8, i8)> {
    for (slot, piece) in session.tray().iter().enumerate() {
        let Some(piece) = piece else { continue };
        let variant = session.catalog().resolve(*piece)?;
        if let Some(&(x, y)) = find_valid_positions(session.board(), variant).first() {
            return Some((slot, x, y));
        }
    }
    None
}

#[test]
fn test_new_session_starts_playable() {
    let session = GameSession::new(GameConfig::default(), 1);
    assert_eq!(session.tray().len(), 3);
    assert!(session.tray().iter().all(Option::is_some));
    assert!(!session.is_game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.combo(), 0);
    assert_eq!(session.level(), 1);
}

#[test]
fn test_same_seed_same_trajectory() {
    let mut a = GameSession::new(GameConfig::default(), 777);
    let mut b = GameSession::new(GameConfig::default(), 777);
    assert_eq!(a.save(), b.save());

    for _ in 0..30 {
        let Some((slot, x, y)) = first_fit(&a) else { break };
        a.place_piece(slot, x, y).unwrap();
        b.place_piece(slot, x, y).unwrap();
        assert_eq!(a.save(), b.save());
    }
}

#[test]
fn test_placement_scores_tiles_and_consumes_slot() {
    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(
            &Board::standard(),
            &[Some((1, 0)), Some((2, 0)), None],
        ))
        .unwrap();

    let outcome = session.place_piece(0, 4, 4).unwrap();
    assert_eq!(outcome.points, 1);
    assert!(outcome.clears.is_none());
    assert!(!outcome.perfect_clear);
    assert!(!outcome.game_over);

    assert_eq!(session.score(), 1);
    assert!(session.board().is_filled(4, 4));
    assert!(session.tray()[0].is_none());
    assert!(session.tray()[1].is_some());
}

#[test]
fn test_tray_refills_after_last_piece() {
    let mut session = GameSession::new(GameConfig::default(), 5);
    session
        .restore(&state_with(&Board::standard(), &[Some((1, 0))]))
        .unwrap();

    session.place_piece(0, 0, 0).unwrap();

    // Tray refills to pieces_per_set fresh slots
    assert_eq!(session.tray().len(), 3);
    assert!(session.tray().iter().all(Option::is_some));
    assert!(!session.is_game_over());
}

#[test]
fn test_clear_scoring_and_combo_lifecycle() {
    let mut board = Board::standard();
    for x in 0..8 {
        board.fill(x, 0);
    }
    board.fill(0, 5); // keeps the clear from being perfect

    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(
            &board,
            &[Some((1, 0)), Some((1, 0)), Some((1, 0))],
        ))
        .unwrap();

    // Completing row 0: 1 placement point + 10 clear bonus
    let outcome = session.place_piece(0, 8, 0).unwrap();
    let clears = outcome.clears.expect("row clear expected");
    assert_eq!(clears.rows, vec![0]);
    assert_eq!(clears.total_lines, 1);
    assert_eq!(outcome.points, 11);
    assert!(!outcome.perfect_clear);
    assert_eq!(session.combo(), 1);
    assert_eq!(session.total_clears(), 1);

    // A clear-less placement resets the combo
    session.place_piece(1, 3, 3).unwrap();
    assert_eq!(session.combo(), 0);
    assert_eq!(session.score(), 12);
}

#[test]
fn test_perfect_clear_bonus() {
    let mut board = Board::standard();
    for x in 0..8 {
        board.fill(x, 0);
    }

    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(&board, &[Some((1, 0)), Some((1, 0))]))
        .unwrap();

    // 1 placement + 10 clear + 100 perfect
    let outcome = session.place_piece(0, 8, 0).unwrap();
    assert!(outcome.perfect_clear);
    assert_eq!(outcome.points, 111);
    assert!(session.board().is_empty());
}

#[test]
fn test_placement_errors() {
    let mut board = Board::standard();
    board.fill(4, 4);

    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(&board, &[Some((1, 0)), None]))
        .unwrap();

    assert_eq!(
        session.place_piece(9, 0, 0),
        Err(PlacementError::SlotOutOfRange(9))
    );
    assert_eq!(session.place_piece(1, 0, 0), Err(PlacementError::SlotEmpty(1)));
    assert_eq!(
        session.place_piece(0, 4, 4),
        Err(PlacementError::DoesNotFit(4, 4))
    );
    assert_eq!(
        session.place_piece(0, 9, 0),
        Err(PlacementError::DoesNotFit(9, 0))
    );
}

#[test]
fn test_game_over_blocks_placement() {
    let mut board = Board::standard();
    for y in 0..9 {
        for x in 0..9 {
            board.fill(x, y);
        }
    }

    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(&board, &[Some((1, 0))]))
        .unwrap();

    assert!(session.is_game_over());
    assert_eq!(session.place_piece(0, 0, 0), Err(PlacementError::GameOver));
}

#[test]
fn test_rotate_piece_cycles() {
    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(&Board::standard(), &[Some((2, 0)), None]))
        .unwrap();

    session.rotate_piece(0).unwrap();
    assert_eq!(session.tray()[0].unwrap().rotation_index, 1);
    session.rotate_piece(0).unwrap();
    assert_eq!(session.tray()[0].unwrap().rotation_index, 0);

    assert_eq!(session.rotate_piece(1), Err(PlacementError::SlotEmpty(1)));
    assert_eq!(
        session.rotate_piece(5),
        Err(PlacementError::SlotOutOfRange(5))
    );
}

#[test]
fn test_restore_drops_unknown_shape_ids() {
    let mut session = GameSession::new(GameConfig::default(), 1);
    session
        .restore(&state_with(
            &Board::standard(),
            &[Some((999, 0)), Some((1, 0))],
        ))
        .unwrap();

    assert!(session.tray()[0].is_none());
    assert!(session.tray()[1].is_some());
    assert!(!session.is_game_over());
}

#[test]
fn test_restore_rejects_malformed_board() {
    let mut session = GameSession::new(GameConfig::default(), 1);
    let before = session.save();

    let mut bad = state_with(&Board::standard(), &[Some((1, 0))]);
    bad.board.truncate(10);
    assert!(session.restore(&bad).is_err());

    // Session state is untouched on a rejected snapshot
    assert_eq!(session.save(), before);
}

#[test]
fn test_save_restore_round_trip_preserves_trajectory() {
    let mut original = GameSession::new(GameConfig::default(), 4242);
    for _ in 0..10 {
        let Some((slot, x, y)) = first_fit(&original) else { break };
        original.place_piece(slot, x, y).unwrap();
    }
    let saved = original.save();

    // Restore into a session created with an unrelated seed
    let mut resumed = GameSession::new(GameConfig::default(), 1);
    resumed.restore(&saved).unwrap();
    assert_eq!(resumed.save(), saved);

    // Both sessions continue identically, tray refills included
    for _ in 0..20 {
        let expected = first_fit(&original);
        assert_eq!(expected, first_fit(&resumed));
        let Some((slot, x, y)) = expected else { break };
        assert_eq!(
            original.place_piece(slot, x, y),
            resumed.place_piece(slot, x, y)
        );
    }
}

#[test]
fn test_save_state_serializes_to_json() {
    let session = GameSession::new(GameConfig::default(), 31337);
    let saved = session.save();

    let json = serde_json::to_string(&saved).unwrap();
    let parsed: SaveState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, saved);
    assert_eq!(parsed.version, SAVE_VERSION);
    assert_eq!(parsed.board.len(), 81);
}
