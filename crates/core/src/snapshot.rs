use crate::board::Cell;
use crate::events::BannerKind;
use crate::piece::{Occupancy, Piece};
use crate::types::{Rgb, ShapeKind, GRID_HEIGHT, GRID_WIDTH, PIECE_GRID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub cells: Occupancy,
    pub x: i8,
    pub y: i8,
    pub color: Rgb,
}

impl ActiveSnapshot {
    /// Board coordinates of every occupied cell.
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..PIECE_GRID).flat_map(move |dy| {
            (0..PIECE_GRID)
                .filter(move |&dx| self.cells[dy][dx])
                .map(move |dx| (self.x + dx as i8, self.y + dy as i8))
        })
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            cells: *value.cells(),
            x: value.x,
            y: value.y,
            color: value.color(),
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub banner: Option<BannerKind>,
    pub level: u32,
    pub score: u32,
    /// Lines cleared since the last level-up.
    pub lines: u32,
    pub total_lines: u32,
    pub paused: bool,
    pub game_over: bool,
    pub piece_id: u32,
}

impl GameSnapshot {
    /// Reset to the empty level-1 state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn occupied_count(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| c.occupied)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            banner: None,
            level: 1,
            score: 0,
            lines: 0,
            total_lines: 0,
            paused: false,
            game_over: false,
            piece_id: 0,
        }
    }
}
