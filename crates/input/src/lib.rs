//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key presses into [`crate::types::Command`]s. Each press
//! yields at most one command; the engine decides whether it applies.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_event, map_key, should_quit, KeyAction};
