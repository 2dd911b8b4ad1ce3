//! Terminal rendering for the game.
//!
//! A small, game-oriented rendering layer: the view paints a snapshot into a
//! framebuffer of styled characters, and the renderer diff-flushes that
//! framebuffer to the terminal with `crossterm`. Everything except
//! [`TerminalRenderer`] is pure and unit-tested.

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod ranking;
pub mod render_throttle;
pub mod renderer;

pub use mini_tetris_core as core;
pub use mini_tetris_types as types;

pub use effects::{Particle, ParticleField};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_rgb, AnchorY, BoardLayout, GameView, HudInfo, Viewport};
pub use ranking::Ranking;
pub use render_throttle::{fingerprint, RenderThrottle};
pub use renderer::TerminalRenderer;
