//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the board, the pieces, the rules and the session state
//! machine. It has no dependency on terminals, clocks or threads: the host
//! feeds it inputs and elapsed time and reads back snapshots and events.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merging and line clearing
//! - [`pieces`]: piece matrices and clockwise matrix rotation
//! - [`game_state`]: session state machine, gravity timer, locking and spawning
//! - [`scoring`]: line points, leveling and the gravity curve
//! - [`rng`]: deterministic piece generation (uniform, 7-bag, scripted)
//! - [`config`]: rule configuration loaded from JSON
//! - [`events`]: notifications drained by the host
//! - [`snapshot`]: read-only copies for rendering
//!
//! # Game Rules
//!
//! - Pieces spawn centered at the top; a spawn that collides ends the game.
//! - Rotation is clockwise only. A colliding rotation tries horizontal kicks
//!   of +1, -1, +2 and -2 columns and is rejected if none fit.
//! - A piece that cannot move down locks immediately (no lock delay).
//! - Clearing N lines scores `[0, 40, 100, 300, 1200][N] * level`.
//!
//! # Example
//!
//! ```
//! use mini_tetris_core::GameState;
//! use mini_tetris_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One piece locked, the next one is falling.
//! assert_eq!(game.board().filled_count(), 4);
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::advance`] with elapsed milliseconds, or
//! [`GameState::advance_to`] with a monotonic timestamp, once per host frame.
//! Gravity moves the piece one row once the accumulated time exceeds the
//! level's drop interval.

pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use mini_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, ColorGrid};
pub use config::{ConfigError, GameConfig, Randomizer};
pub use events::GameEvent;
pub use game_state::{GameState, Piece};
pub use pieces::Shape;
pub use rng::{PieceGenerator, PieceQueue, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, drop_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
