//! Discrete game events pushed to audio and other observers.

use std::fmt;

use crate::types::ShapeKind;

/// Text overlay shown while the game is paused for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerKind {
    Level(u32),
    GameOver,
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BannerKind::Level(level) => write!(f, "LEVEL {level}"),
            BannerKind::GameOver => f.write_str("GAME OVER"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Spawned { kind: ShapeKind, piece_id: u32 },
    Locked { kind: ShapeKind, piece_id: u32 },
    RowFlashed { row: usize },
    LineCleared {
        row: usize,
        total_lines: u32,
        score: u32,
    },
    LevelUp { level: u32 },
    BannerShown(BannerKind),
    GameOver { score: u32 },
}
