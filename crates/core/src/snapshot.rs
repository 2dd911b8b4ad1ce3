use crate::board::{ColorGrid, COLS, ROWS};
use crate::game_state::Piece;
use crate::pieces::Shape;
use crate::types::{Phase, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn color_index(&self) -> u8 {
        self.kind.color_index()
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl From<PieceKind> for NextSnapshot {
    fn from(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::spawn(kind),
        }
    }
}

/// Read-only copy of everything the host paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: ColorGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<NextSnapshot>,
    pub phase: Phase,
    pub session_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub drop_timer_ms: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLS]; ROWS],
            active: None,
            next: None,
            phase: Phase::Ready,
            session_id: 0,
            score: 0,
            level: crate::types::START_LEVEL,
            lines: 0,
            drop_interval_ms: crate::types::BASE_DROP_MS,
            drop_timer_ms: 0,
        }
    }
}
