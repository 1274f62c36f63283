//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell carries an occupancy flag and a color.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use log::trace;

use crate::piece::Piece;
use crate::types::{Rgb, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

const WIDTH: usize = GRID_WIDTH as usize;

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub occupied: bool,
    pub color: Rgb,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        color: Rgb::new(0, 0, 0),
    };

    pub const fn filled(color: Rgb) -> Self {
        Self {
            occupied: true,
            color,
        }
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    fn row_range(y: usize) -> std::ops::Range<usize> {
        assert!(y < GRID_HEIGHT as usize, "row {y} outside the board");
        let start = y * WIDTH;
        start..start + WIDTH
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell { occupied: true, .. }))
    }

    /// Row contains at least one occupied cell
    pub fn row_has_any(&self, y: usize) -> bool {
        self.cells[Self::row_range(y)].iter().any(|c| c.occupied)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[Self::row_range(y)].iter().all(|c| c.occupied)
    }

    /// Repaint every cell of a row without touching occupancy.
    pub fn paint_row(&mut self, y: usize, color: Rgb) {
        for cell in &mut self.cells[Self::row_range(y)] {
            cell.color = color;
        }
    }

    /// Copy row `y - 1` over row `y`. Returns whether the copied row had any block.
    pub fn shift_row_down(&mut self, y: usize) -> bool {
        assert!(y > 0, "row 0 has nothing above it");
        let src = Self::row_range(y - 1);
        let had_any = self.cells[src.clone()].iter().any(|c| c.occupied);
        self.cells.copy_within(src, y * WIDTH);
        had_any
    }

    /// Empty every cell of a row.
    pub fn clear_row(&mut self, y: usize) {
        self.cells[Self::row_range(y)].fill(Cell::EMPTY);
    }

    /// The piece's bounding box fits inside the grid.
    pub fn in_bounds(&self, piece: &Piece) -> bool {
        piece.left() >= 0
            && piece.right() < GRID_WIDTH as i8
            && piece.top() >= 0
            && piece.bottom() < GRID_HEIGHT as i8
    }

    /// Any occupied cell of the piece lands on an occupied board cell.
    pub fn overlaps(&self, piece: &Piece) -> bool {
        piece.blocks().any(|(x, y)| self.is_occupied(x, y))
    }

    /// Legal resting place: inside the grid and free.
    pub fn fits(&self, piece: &Piece) -> bool {
        self.in_bounds(piece) && !self.overlaps(piece)
    }

    /// Write the piece's color into the board.
    ///
    /// Locking a block outside the grid is a defect in the caller.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let cell = Cell::filled(piece.color());
        for (x, y) in piece.blocks() {
            let written = self.set(x, y, cell);
            assert!(written, "locked block ({x}, {y}) outside the board");
        }
        trace!("locked {:?} at ({}, {})", piece.kind(), piece.x, piece.y);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
