//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no external dependencies, so it can be
//! shared by the game rules, the engine actor, input mapping and rendering.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `HARD_DROP_STEP_MS` | 30 | Delay between two hard-drop steps |
//! | `CLEAR_FLASH_MS` | 250 | A full row stays painted before it collapses |
//! | `COLLAPSE_STEP_MS` | 30 | Delay between two row shifts of a collapse |
//! | `BANNER_MS` | 3000 | Level banner duration |
//! | `GAME_OVER_BANNER_MS` | 5000 | Game-over banner duration |
//! | `RENDER_INTERVAL_MS` | 30 | Frame pull interval of the terminal front end |
//!
//! # Gravity by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 750ms |
//! | 3 | 500ms |
//! | 4 | 300ms |
//! | 5 | 150ms |
//! | 6 | 75ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let shape = ShapeKind::from_str("triangle").unwrap();
//! assert_eq!(shape, ShapeKind::Triangle);
//! assert_eq!(ShapeKind::from_index(shape.index()), Some(shape));
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Side of the square occupancy grid every piece carries
pub const PIECE_GRID: usize = 4;

/// Gravity interval per level, level 1 first.
pub const LEVEL_DELAYS_MS: [u32; 6] = [1000, 750, 500, 300, 150, 75];

/// Highest reachable level (the length of the speed table)
pub const MAX_LEVEL: u32 = LEVEL_DELAYS_MS.len() as u32;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded for a successful spawn
pub const SPAWN_SCORE: u32 = 1;

/// Points awarded per cleared line
pub const LINE_SCORE: u32 = 10;

/// Maximum correction passes after a rotation before it is rejected
pub const ROTATION_NUDGE_LIMIT: u8 = 4;

pub const HARD_DROP_STEP_MS: u32 = 30;
pub const CLEAR_FLASH_MS: u32 = 250;
pub const COLLAPSE_STEP_MS: u32 = 30;
pub const BANNER_MS: u32 = 3000;
pub const GAME_OVER_BANNER_MS: u32 = 5000;
pub const RENDER_INTERVAL_MS: u32 = 30;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color painted over a full row right before it collapses.
pub const CLEARED_COLOR: Rgb = Rgb::new(0, 0, 0);

/// The seven piece shapes
///
/// Each shape has a distinct color:
/// - **Line**: cyan, four in a row
/// - **StraightL**: orange
/// - **InvertedL**: blue
/// - **Square**: yellow, 2x2, never rotates
/// - **StraightSkew**: green
/// - **InvertedSkew**: red
/// - **Triangle**: purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    StraightL,
    InvertedL,
    Square,
    StraightSkew,
    InvertedSkew,
    Triangle,
}

impl ShapeKind {
    /// Every shape, in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Line,
        ShapeKind::StraightL,
        ShapeKind::InvertedL,
        ShapeKind::Square,
        ShapeKind::StraightSkew,
        ShapeKind::InvertedSkew,
        ShapeKind::Triangle,
    ];

    /// Catalog index of the shape.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shape for a catalog index. Unknown tags yield `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a shape from its name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" => Some(ShapeKind::Line),
            "straightl" => Some(ShapeKind::StraightL),
            "invertedl" => Some(ShapeKind::InvertedL),
            "square" => Some(ShapeKind::Square),
            "straightskew" => Some(ShapeKind::StraightSkew),
            "invertedskew" => Some(ShapeKind::InvertedSkew),
            "triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::StraightL => "straightL",
            ShapeKind::InvertedL => "invertedL",
            ShapeKind::Square => "square",
            ShapeKind::StraightSkew => "straightSkew",
            ShapeKind::InvertedSkew => "invertedSkew",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Fixed color of the shape.
    pub fn color(self) -> Rgb {
        match self {
            ShapeKind::Line => Rgb::new(0, 255, 255),
            ShapeKind::StraightL => Rgb::new(255, 165, 0),
            ShapeKind::InvertedL => Rgb::new(0, 0, 255),
            ShapeKind::Square => Rgb::new(255, 255, 0),
            ShapeKind::StraightSkew => Rgb::new(0, 128, 0),
            ShapeKind::InvertedSkew => Rgb::new(255, 0, 0),
            ShapeKind::Triangle => Rgb::new(128, 0, 128),
        }
    }
}

/// A single step applied to a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
    /// Quarter turn clockwise.
    Rotate,
}

/// Commands accepted from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
        }
    }
}
