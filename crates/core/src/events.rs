//! Events the engine emits for its host.
//!
//! The engine never calls into the host. It queues events while handling an
//! input or a tick and the host drains them with
//! [`GameState::take_events`](crate::GameState::take_events).

use crate::board::ClearedRows;
use crate::types::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Visible state changed; the host should repaint from a fresh snapshot.
    Render,
    /// Score, level or line count changed (also sent once per fresh session).
    ScoreChanged { score: u32, level: u32, lines: u32 },
    /// Rows removed by one lock, as pre-clear indices, bottom to top.
    LinesCleared { rows: ClearedRows },
    /// Level increased and gravity sped up.
    LevelUp { level: u32, drop_interval_ms: u32 },
    PhaseChanged { from: Phase, to: Phase },
    /// A freshly spawned piece could not be placed.
    GameOver { score: u32 },
}
