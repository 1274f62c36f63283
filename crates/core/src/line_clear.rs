//! Line-clear engine - full-row detection and collapse as an explicit state machine
//!
//! Rows are scanned from the bottom up. The scan stops at the first empty row.
//! A full row is first painted with [`CLEARED_COLOR`], then every row above it
//! is shifted down by one, one row per step, until the shifted-in row is empty
//! or row 0 is reached. The same row index is then scanned again, because the
//! row that fell into it may be full too.
//!
//! Each call to [`LineClear::step`] performs one visible change so that the
//! caller can pause between steps (see [`ClearStep::delay_ms`]).

use log::debug;

use crate::board::Board;
use crate::types::{CLEARED_COLOR, GRID_HEIGHT};

const BOTTOM_ROW: usize = GRID_HEIGHT as usize - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Scan { row: usize },
    Flashed { row: usize },
    Collapse { cleared: usize, dst: usize },
    Finished,
}

/// What a single step did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearStep {
    /// A full row was painted with the cleared color.
    Flashed { row: usize },
    /// Row `row - 1` was copied into `row`.
    Shifted { row: usize },
    /// The collapse of the full row at `row` completed; one line was cleared.
    Collapsed { row: usize },
    /// No full row is left.
    Finished,
}

impl ClearStep {
    /// Pause the caller should observe after this step before stepping again.
    pub fn delay_ms(self, flash_ms: u32, collapse_ms: u32) -> Option<u32> {
        match self {
            ClearStep::Flashed { .. } => Some(flash_ms),
            ClearStep::Shifted { .. } | ClearStep::Collapsed { .. } => Some(collapse_ms),
            ClearStep::Finished => None,
        }
    }
}

/// Line-clear pass over one board, advanced one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClear {
    stage: Stage,
    lines: u32,
}

impl LineClear {
    pub fn new() -> Self {
        Self {
            stage: Stage::Scan { row: BOTTOM_ROW },
            lines: 0,
        }
    }

    /// Lines cleared so far by this pass.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Perform the next visible change.
    pub fn step(&mut self, board: &mut Board) -> ClearStep {
        match self.stage {
            Stage::Scan { row } => self.scan(board, row),
            Stage::Flashed { row } => {
                self.stage = Stage::Collapse {
                    cleared: row,
                    dst: row,
                };
                self.collapse(board, row, row)
            }
            Stage::Collapse { cleared, dst } => self.collapse(board, cleared, dst),
            Stage::Finished => ClearStep::Finished,
        }
    }

    fn scan(&mut self, board: &mut Board, mut row: usize) -> ClearStep {
        loop {
            if !board.row_has_any(row) {
                break;
            }
            if board.is_row_full(row) {
                board.paint_row(row, CLEARED_COLOR);
                self.stage = Stage::Flashed { row };
                debug!("row {row} full");
                return ClearStep::Flashed { row };
            }
            if row == 0 {
                break;
            }
            row -= 1;
        }
        self.stage = Stage::Finished;
        ClearStep::Finished
    }

    fn collapse(&mut self, board: &mut Board, cleared: usize, dst: usize) -> ClearStep {
        if dst == 0 {
            board.clear_row(0);
            return self.collapsed(cleared);
        }
        if board.shift_row_down(dst) {
            self.stage = Stage::Collapse {
                cleared,
                dst: dst - 1,
            };
            ClearStep::Shifted { row: dst }
        } else {
            self.collapsed(cleared)
        }
    }

    fn collapsed(&mut self, row: usize) -> ClearStep {
        self.lines += 1;
        self.stage = Stage::Scan { row };
        debug!("row {row} collapsed");
        ClearStep::Collapsed { row }
    }
}

impl Default for LineClear {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a whole pass without pauses. Returns the number of cleared lines.
pub fn clear_full_rows(board: &mut Board) -> u32 {
    let mut pass = LineClear::new();
    while pass.step(board) != ClearStep::Finished {}
    pass.lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::types::{ShapeKind, GRID_WIDTH};

    fn fill_row(board: &mut Board, y: i8, except: Option<i8>) {
        for x in 0..GRID_WIDTH as i8 {
            if Some(x) != except {
                board.set(x, y, Cell::filled(ShapeKind::Triangle.color()));
            }
        }
    }

    #[test]
    fn test_empty_board_finishes_immediately() {
        let mut board = Board::new();
        let mut pass = LineClear::new();
        assert_eq!(pass.step(&mut board), ClearStep::Finished);
        assert!(pass.is_finished());
        assert_eq!(pass.lines(), 0);
    }

    #[test]
    fn test_single_row_step_sequence() {
        let mut board = Board::new();
        fill_row(&mut board, 19, None);
        board.set(2, 18, Cell::filled(ShapeKind::Line.color()));
        board.set(7, 17, Cell::filled(ShapeKind::Square.color()));

        let mut pass = LineClear::new();
        assert_eq!(pass.step(&mut board), ClearStep::Flashed { row: 19 });
        assert_eq!(board.get(0, 19).unwrap().color, CLEARED_COLOR);
        assert!(board.is_row_full(19));

        assert_eq!(pass.step(&mut board), ClearStep::Shifted { row: 19 });
        assert_eq!(pass.step(&mut board), ClearStep::Shifted { row: 18 });
        // Row 16 is empty: copying it into 17 ends the collapse.
        assert_eq!(pass.step(&mut board), ClearStep::Collapsed { row: 19 });
        assert_eq!(pass.step(&mut board), ClearStep::Finished);

        assert_eq!(pass.lines(), 1);
        assert!(board.is_occupied(2, 19));
        assert!(board.is_occupied(7, 18));
        assert!(!board.row_has_any(17));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_stacked_full_rows_rescan_same_index() {
        let mut board = Board::new();
        fill_row(&mut board, 19, None);
        fill_row(&mut board, 18, None);
        fill_row(&mut board, 17, Some(0));

        assert_eq!(clear_full_rows(&mut board), 2);
        assert!(!board.is_occupied(0, 19));
        assert!(board.is_occupied(1, 19));
        assert!(!board.row_has_any(18));
        assert_eq!(board.occupied_count(), 9);
    }

    #[test]
    fn test_scan_stops_at_empty_row() {
        let mut board = Board::new();
        fill_row(&mut board, 10, None);
        assert_eq!(clear_full_rows(&mut board), 0);
        assert!(board.is_row_full(10));
    }

    #[test]
    fn test_full_column_reaches_row_zero() {
        let mut board = Board::new();
        for y in 0..GRID_HEIGHT as i8 {
            board.set(0, y, Cell::filled(ShapeKind::Line.color()));
        }
        fill_row(&mut board, 19, None);

        assert_eq!(clear_full_rows(&mut board), 1);
        assert!(!board.row_has_any(0));
        for y in 1..GRID_HEIGHT as i8 {
            assert!(board.is_occupied(0, y));
        }
        assert_eq!(board.occupied_count(), 19);
    }

    #[test]
    fn test_delays() {
        let flash = ClearStep::Flashed { row: 19 };
        assert_eq!(flash.delay_ms(250, 30), Some(250));
        assert_eq!(ClearStep::Shifted { row: 3 }.delay_ms(250, 30), Some(30));
        assert_eq!(ClearStep::Finished.delay_ms(250, 30), None);
    }
}
