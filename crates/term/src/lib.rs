//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders
//! [`GameSnapshot`](blockfall_core::GameSnapshot)s into a framebuffer of styled
//! glyphs and flushes that framebuffer to the terminal, rewriting only what
//! changed since the previous frame.
//!
//! The renderer only ever reads snapshots; it never touches game state.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{BoardFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
