//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependency on timers, threads, terminals or channels:
//!
//! - **Deterministic**: the same seed produces the same shape sequence
//! - **Synchronous**: timed pauses are reported, never slept
//! - **Testable**: every rule can be driven step by step
//!
//! # Module Structure
//!
//! - [`piece`]: shape catalog, occupancy grids and clockwise rotation
//! - [`board`]: 10x20 grid of colored cells
//! - [`collision`]: legality checks, rotation correction and spawn placement
//! - [`line_clear`]: full-row flash and collapse, one step at a time
//! - [`scoring`]: points, level table and level progression
//! - [`rng`]: seeded shape picker
//! - [`game_state`]: the complete game and its command surface
//! - [`snapshot`]: copies handed to renderers
//! - [`events`]: discrete events handed to audio
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, Outcome, Phase};
//! use blockfall_types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // The "LEVEL 1" banner pauses the game first.
//! assert_eq!(game.phase(), Phase::Paused);
//! assert_eq!(game.apply_command(Command::MoveLeft), Outcome::Ignored);
//! game.settle();
//!
//! assert_eq!(game.apply_command(Command::HardDrop), Outcome::Locked);
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod board;
pub mod collision;
pub mod events;
pub mod game_state;
pub mod line_clear;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use collision::{can_move, can_place, spawn_piece, try_rotate};
pub use events::{BannerKind, GameEvent};
pub use game_state::{GameState, Outcome, Phase, Timings};
pub use line_clear::{clear_full_rows, ClearStep, LineClear};
pub use piece::{Area, Piece, SHAPES};
pub use rng::{ShapePicker, SimpleRng};
pub use scoring::{level_delay_ms, next_level};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
