//! Line-clear tests - flash, collapse and rescan on real boards

use blockfall::core::{clear_full_rows, Board, Cell, ClearStep, LineClear};
use blockfall::types::{Rgb, CLEARED_COLOR, GRID_WIDTH};

const GRAY: Rgb = Rgb::new(128, 128, 128);

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..GRID_WIDTH as i8 {
        board.set(x, y, Cell::filled(GRAY));
    }
}

#[test]
fn test_rows_above_shift_by_exactly_one() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    // A little tower above the full row.
    for (x, y) in [(0, 18), (0, 17), (1, 17), (5, 16)] {
        board.set(x, y, Cell::filled(GRAY));
    }

    assert_eq!(clear_full_rows(&mut board), 1);

    for (x, y) in [(0, 19), (0, 18), (1, 18), (5, 17)] {
        assert!(board.is_occupied(x, y), "({x}, {y})");
    }
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_flash_paints_row_before_collapse() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(4, 18, Cell::filled(GRAY));

    let mut pass = LineClear::new();
    assert_eq!(pass.step(&mut board), ClearStep::Flashed { row: 19 });
    for x in 0..GRID_WIDTH as i8 {
        assert_eq!(board.get(x, 19), Some(Cell::filled(CLEARED_COLOR)));
    }
    assert_eq!(pass.lines(), 0);

    let mut steps = Vec::new();
    loop {
        let step = pass.step(&mut board);
        steps.push(step);
        if step == ClearStep::Finished {
            break;
        }
    }
    assert_eq!(
        steps,
        vec![
            ClearStep::Shifted { row: 19 },
            ClearStep::Collapsed { row: 19 },
            ClearStep::Finished,
        ]
    );
    assert_eq!(board.get(4, 19), Some(Cell::filled(GRAY)));
    assert_eq!(pass.lines(), 1);
}

#[test]
fn test_four_full_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y);
    }
    board.set(9, 15, Cell::filled(GRAY));

    assert_eq!(clear_full_rows(&mut board), 4);
    assert_eq!(board.occupied_count(), 1);
    assert!(board.is_occupied(9, 19));
}

#[test]
fn test_gap_row_is_kept() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    fill_row(&mut board, 17);
    board.set(2, 18, Cell::filled(GRAY));

    // Row 19 collapses; old row 17 lands on 18 and is cleared on rescan of 18.
    assert_eq!(clear_full_rows(&mut board), 2);
    assert_eq!(board.occupied_count(), 1);
    assert!(board.is_occupied(2, 19));
}
