//! Integration tests for the game rules driven through the command surface

use blockfall::core::{
    spawn_piece, BannerKind, Board, Cell, GameEvent, GameState, Outcome, Phase, Piece,
};
use blockfall::types::{
    Command, ShapeKind, BANNER_MS, CLEARED_COLOR, CLEAR_FLASH_MS, COLLAPSE_STEP_MS, GRID_WIDTH,
    LINE_SCORE, SPAWN_SCORE,
};

fn running_game(seed: u32) -> GameState {
    let mut game = GameState::new(seed);
    game.start();
    game.settle();
    game.drain_events();
    game
}

fn drop_piece(game: &mut GameState, piece: Piece) {
    game.set_active(piece);
    assert_eq!(game.apply_command(Command::HardDrop), Outcome::Locked);
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert!(!game.started());
    assert!(game.active().is_none());

    game.start();
    assert!(game.started());
    assert!(game.active().is_some());
    assert_eq!(game.banner(), Some(BannerKind::Level(1)));
    assert_eq!(game.pending_delay_ms(), Some(BANNER_MS));
    assert_eq!(game.score(), SPAWN_SCORE);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::BannerShown(BannerKind::Level(1))));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Spawned { piece_id: 1, .. })));
}

#[test]
fn test_bottom_row_filled_by_locked_pieces_clears() {
    let mut game = running_game(7);

    drop_piece(&mut game, Piece::new(ShapeKind::Line).at(0, -1));
    game.settle();
    drop_piece(&mut game, Piece::new(ShapeKind::Line).at(4, -1));
    game.settle();
    // Square blocks sit in grid columns 1..=2, so x = 7 covers board columns 8 and 9.
    drop_piece(&mut game, Piece::new(ShapeKind::Square).at(7, 0));

    let score_before = game.score();
    assert_eq!(score_before, 4 * SPAWN_SCORE);

    // Row 19 is detected full and painted.
    assert_eq!(game.phase(), Phase::Paused);
    assert_eq!(game.pending_delay_ms(), Some(CLEAR_FLASH_MS));
    let snap = game.snapshot();
    assert!(snap.paused);
    for cell in snap.board[19].iter() {
        assert_eq!(*cell, Cell::filled(CLEARED_COLOR));
    }

    game.resume();
    assert_eq!(game.pending_delay_ms(), Some(COLLAPSE_STEP_MS));
    game.settle();

    // Rows above moved down by one: the Square's top half is now on row 19.
    let board = game.board();
    assert_eq!(board.occupied_count(), 2);
    assert_eq!(board.get(8, 19), Some(Cell::filled(ShapeKind::Square.color())));
    assert_eq!(board.get(9, 19), Some(Cell::filled(ShapeKind::Square.color())));
    assert!(!board.row_has_any(18));

    assert_eq!(game.score(), score_before + LINE_SCORE);
    assert_eq!(game.lines(), 1);
    assert_eq!(game.total_lines(), 1);
    assert_eq!(game.level(), 1);
    assert_eq!(game.banner(), None);

    let events = game.drain_events();
    assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })));
    assert!(events.contains(&GameEvent::RowFlashed { row: 19 }));
}

#[test]
fn test_straight_l_rotation_nudged_right() {
    let mut game = running_game(21);
    let mut piece = Piece::new(ShapeKind::StraightL);
    piece.rotate();
    // Bounding box left edge on column 0.
    let piece = piece.at(-1, 4);
    assert_eq!(piece.left(), 0);
    game.set_active(piece);

    assert_eq!(game.apply_command(Command::RotateCw), Outcome::Moved);
    let rotated = game.active().unwrap();
    assert_eq!(rotated.left(), 0);
    assert_eq!(rotated.x, piece.x + 1);
    assert_eq!(rotated.y, piece.y);
}

#[test]
fn test_level_advances_after_ten_lines() {
    let mut board = Board::new();
    for y in 10..20 {
        for x in 1..GRID_WIDTH as i8 {
            board.set(x, y, Cell::filled(ShapeKind::Triangle.color()));
        }
    }
    let mut game = GameState::with_board(3, board);
    game.start();
    game.settle();

    // Vertical Line down the open column 0: 4 + 4 + 2 rows.
    let mut vertical = Piece::new(ShapeKind::Line);
    vertical.rotate();
    let vertical = vertical.at(-2, 0);
    assert_eq!(vertical.left(), 0);

    for expected_total in [4, 8, 10] {
        assert_eq!(game.level(), 1);
        drop_piece(&mut game, vertical);
        while game.paused() && game.banner().is_none() {
            game.resume();
        }
        assert_eq!(game.total_lines(), expected_total);
    }

    assert_eq!(game.banner(), Some(BannerKind::Level(2)));
    assert_eq!(game.level(), 2);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.gravity_interval_ms(), Some(750));
    assert_eq!(game.score(), 4 * SPAWN_SCORE + 10 * LINE_SCORE);
}

#[test]
fn test_blocked_spawn_is_terminal() {
    let mut board = Board::new();
    for x in 0..GRID_WIDTH as i8 - 1 {
        board.set(x, 2, Cell::filled(ShapeKind::Line.color()));
        board.set(x, 1, Cell::filled(ShapeKind::Line.color()));
    }
    let mut game = GameState::with_board(99, board);
    game.start();

    assert!(game.game_over());
    assert_eq!(game.phase(), Phase::GameOver);
    game.settle();

    for command in [Command::MoveLeft, Command::RotateCw, Command::HardDrop] {
        assert_eq!(game.apply_command(command), Outcome::Ignored);
    }
    assert_eq!(game.tick(), Outcome::Ignored);
    assert!(game.game_over());
    assert_eq!(
        game.drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count(),
        1
    );
}

#[test]
fn test_spawn_position_is_centered() {
    let game = running_game(5);
    let active = game.active().unwrap();
    assert_eq!(active, spawn_piece(active.kind()));
    assert_eq!(active.top(), 0);
}
