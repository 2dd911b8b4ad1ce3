//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Key presses
//! and terminal auto-repeat both produce actions; releases are ignored, so
//! holding an arrow key repeats at the terminal's own rate.

pub mod map;

pub use mini_tetris_types as types;

pub use map::{handle_key_event, map_key_event, should_quit};
