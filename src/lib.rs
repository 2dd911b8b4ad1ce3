//! Mini Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name:
//! `mini_tetris::{core, input, term, types}`. The engine lives in `core`;
//! the terminal front end in `input` and `term`.

pub use mini_tetris_core as core;
pub use mini_tetris_input as input;
pub use mini_tetris_term as term;
pub use mini_tetris_types as types;
