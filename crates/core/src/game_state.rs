//! Game state module - the board & piece engine session
//!
//! `GameState` owns the board, the active and next piece, the score session and
//! the drop timer. It is a plain value: the host creates it, feeds it inputs and
//! elapsed time, reads snapshots and drains events. Nothing here knows about
//! terminals, clocks or schedulers.
//!
//! Lifecycle:
//!
//! ```text
//! Ready --start--> Running --pause--> Paused --resume--> Running
//! Running --lock + blocked spawn--> GameOver --start--> (reset) Running
//! any --reset--> Ready (or Running with `start_on_reset`)
//! ```

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::events::GameEvent;
use crate::pieces::{spawn_x, Shape, SPAWN_Y};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_level, calculate_line_score, drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// Falling piece: a shape matrix placed with its top-left corner at (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece with its spawn matrix at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::spawn(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: SPAWN_Y,
        }
    }

    pub fn color_index(&self) -> u8 {
        self.kind.color_index()
    }

    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    next: Option<PieceKind>,
    generator: PieceGenerator,
    phase: Phase,
    /// Monotonic session id (increments on every reinitialization after the first).
    session_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    /// Wall-clock baseline for `advance_to`; cleared whenever gravity stops.
    last_time_ms: Option<u64>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default rules and the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default().with_seed(seed);
        let generator = PieceGenerator::new(config.randomizer, config.seed);
        Self::with_generator(config, generator)
    }

    /// Create a new game from a validated configuration
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = PieceGenerator::new(config.randomizer, config.seed);
        Ok(Self::with_generator(config, generator))
    }

    /// Create a new game with an explicit piece source (replays, tests)
    pub fn with_generator(config: GameConfig, generator: PieceGenerator) -> Self {
        let drop_interval_ms = drop_interval_ms(START_LEVEL, &config);
        Self {
            config,
            board: Board::new(),
            active: None,
            next: None,
            generator,
            phase: Phase::Ready,
            session_id: 0,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            drop_interval_ms,
            drop_timer_ms: 0,
            last_time_ms: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Collision test against the current board
    pub fn is_colliding(&self, x: i8, y: i8, shape: &Shape) -> bool {
        self.board.collides(shape, x, y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(NextSnapshot::from);
        out.phase = self.phase;
        out.session_id = self.session_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.drop_timer_ms = self.drop_timer_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start the game.
    ///
    /// From `Ready` this spawns the first piece pair unless a reset already did;
    /// from `Paused` it resumes; from `GameOver` it resets and starts over.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Ready => {
                if self.active.is_none() {
                    self.init_session();
                }
                self.set_phase(Phase::Running);
                true
            }
            Phase::Paused => self.resume(),
            Phase::GameOver => {
                self.restart_session();
                self.set_phase(Phase::Running);
                true
            }
            Phase::Running => false,
        }
    }

    /// Reinitialize board, score and pieces from any phase.
    pub fn reset(&mut self) -> bool {
        self.restart_session();
        self.set_phase(Phase::Ready);
        if self.config.start_on_reset {
            self.set_phase(Phase::Running);
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.set_phase(Phase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.set_phase(Phase::Running);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Ready | Phase::GameOver => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift_horizontal(1)
    }

    /// Move down one row, locking the piece if it cannot move.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_piece_input() {
            return false;
        }
        self.step_down();
        true
    }

    /// Drop to the lowest reachable row and lock.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_piece_input() {
            return false;
        }

        let mut distance: u32 = 0;
        while self.try_shift(0, 1) {
            distance += 1;
        }
        debug!(distance, "hard drop");

        self.lock_active();
        self.drop_timer_ms = 0;
        self.emit(GameEvent::Render);
        true
    }

    /// Rotate 90° clockwise, trying kicks of +1, -1, +2, -2 columns.
    ///
    /// Returns false (and leaves the piece untouched) when no placement fits.
    pub fn rotate(&mut self) -> bool {
        if !self.accepts_piece_input() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = Piece {
            shape: piece.shape.rotated_cw(),
            ..piece
        };
        let placed = if rotated.collides(&self.board) {
            KICK_OFFSETS
                .iter()
                .map(|&dx| rotated.shifted(dx, 0))
                .find(|candidate| !candidate.collides(&self.board))
        } else {
            Some(rotated)
        };

        if let Some(placed) = placed {
            if placed.x != piece.x {
                debug!(kind = piece.kind.as_str(), kick = placed.x - piece.x, "rotation kicked");
            }
            self.active = Some(placed);
        }
        self.emit(GameEvent::Render);
        placed.is_some()
    }

    /// Feed elapsed time. Runs one gravity tick once the accumulated time
    /// exceeds the drop interval; overshoot is discarded.
    ///
    /// Returns true when a gravity tick ran.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.drop_interval_ms {
            self.step_down();
            return true;
        }
        false
    }

    /// Feed a wall-clock timestamp. The first call after start/resume only
    /// sets the baseline, so time spent paused never counts.
    pub fn advance_to(&mut self, now_ms: u64) -> bool {
        if self.phase != Phase::Running {
            self.last_time_ms = None;
            return false;
        }
        let delta = match self.last_time_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_time_ms = Some(now_ms);
        self.advance(u32::try_from(delta).unwrap_or(u32::MAX))
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action.is_piece_input() && !self.accepts_piece_input() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Reset => self.reset(),
        }
    }

    fn accepts_piece_input(&self) -> bool {
        self.phase == Phase::Running && self.active.is_some()
    }

    fn shift_horizontal(&mut self, dx: i8) -> bool {
        if !self.accepts_piece_input() {
            return false;
        }
        let moved = self.try_shift(dx, 0);
        self.emit(GameEvent::Render);
        moved
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let moved = piece.shifted(dx, dy);
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// One gravity step. Returns true when the piece locked.
    fn step_down(&mut self) -> bool {
        let locked = if self.try_shift(0, 1) {
            false
        } else {
            self.lock_active();
            true
        };
        self.drop_timer_ms = 0;
        self.emit(GameEvent::Render);
        locked
    }

    /// Merge the active piece, clear lines, score them and spawn the next piece.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y, piece.kind);
        let cleared = self.board.clear_full_rows();
        debug_assert!(
            cleared.len() <= MAX_LINES_PER_LOCK,
            "one lock cleared {} rows",
            cleared.len()
        );
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines = cleared.len(),
            "piece locked"
        );

        if !cleared.is_empty() {
            let count = cleared.len();
            self.score = self
                .score
                .saturating_add(calculate_line_score(count, self.level));
            self.lines = self.lines.saturating_add(count as u32);
            self.emit(GameEvent::LinesCleared { rows: cleared });

            let level = calculate_level(self.lines, self.config.lines_per_level);
            if level > self.level {
                self.level = level;
                self.drop_interval_ms = drop_interval_ms(level, &self.config);
                info!(level, drop_interval_ms = self.drop_interval_ms, "level up");
                self.emit(GameEvent::LevelUp {
                    level,
                    drop_interval_ms: self.drop_interval_ms,
                });
            }
            self.emit_score();
        }

        self.spawn_piece();
    }

    /// Promote the next piece (drawing one if there is none) and draw a new next.
    ///
    /// A spawn that collides ends the game; the blocked piece stays visible.
    fn spawn_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.generator.next_kind(),
        };
        let piece = Piece::spawn(kind);
        self.next = Some(self.generator.next_kind());
        self.active = Some(piece);

        if piece.collides(&self.board) {
            info!(
                score = self.score,
                level = self.level,
                lines = self.lines,
                "game over"
            );
            self.set_phase(Phase::GameOver);
            self.emit(GameEvent::GameOver { score: self.score });
            return false;
        }
        true
    }

    fn init_session(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.drop_interval_ms = drop_interval_ms(START_LEVEL, &self.config);
        self.drop_timer_ms = 0;
        self.last_time_ms = None;
        self.spawn_piece();
        self.emit_score();
        self.emit(GameEvent::Render);
    }

    fn restart_session(&mut self) {
        self.session_id = self.session_id.wrapping_add(1);
        self.init_session();
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        if to == Phase::Running {
            self.last_time_ms = None;
        }
        info!(from = from.as_str(), to = to.as_str(), "phase changed");
        self.emit(GameEvent::PhaseChanged { from, to });
        self.emit(GameEvent::Render);
    }

    fn emit_score(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            score: self.score,
            level: self.level,
            lines: self.lines,
        });
    }

    fn emit(&mut self, event: GameEvent) {
        if event == GameEvent::Render && self.events.last() == Some(&GameEvent::Render) {
            return;
        }
        self.events.push(event);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(kinds: &[PieceKind]) -> GameState {
        GameState::with_generator(GameConfig::default(), PieceGenerator::scripted(kinds.to_vec()))
    }

    fn started(kinds: &[PieceKind]) -> GameState {
        let mut state = scripted(kinds);
        state.start();
        state.take_events();
        state
    }

    fn fill_row_except(board: &mut Board, y: i8, skip: std::ops::Range<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if !skip.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.drop_interval_ms, 1000);
        assert!(state.active.is_none());
        assert!(state.next.is_none());
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_start_spawns_piece_pair() {
        let mut state = scripted(&[PieceKind::T, PieceKind::O]);
        assert!(state.start());

        assert_eq!(state.phase, Phase::Running);
        let active = state.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (4, 0));
        assert_eq!(state.next, Some(PieceKind::O));

        let events = state.take_events();
        assert!(events.contains(&GameEvent::ScoreChanged {
            score: 0,
            level: 1,
            lines: 0
        }));
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: Phase::Ready,
            to: Phase::Running
        }));
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut state = started(&[PieceKind::T]);
        assert!(!state.start());
    }

    #[test]
    fn test_inputs_ignored_unless_running() {
        let mut state = scripted(&[PieceKind::T]);
        assert!(!state.move_left());
        assert!(!state.hard_drop());
        assert!(!state.rotate());

        state.start();
        state.pause();
        let before = state.active;
        assert!(!state.move_left());
        assert!(!state.soft_drop());
        assert!(!state.hard_drop());
        assert!(!state.rotate());
        assert!(!state.advance(5000));
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_move_reverts_at_wall_and_still_renders() {
        let mut state = started(&[PieceKind::O]);
        // O spawns at x=4 and is 2 wide: 4 moves reach the right wall.
        for _ in 0..4 {
            assert!(state.move_right());
        }
        assert_eq!(state.active.unwrap().x, 8);
        state.take_events();

        assert!(!state.move_right());
        assert_eq!(state.active.unwrap().x, 8);
        assert_eq!(state.take_events(), vec![GameEvent::Render]);
    }

    #[test]
    fn test_rotate_without_collision() {
        let mut state = started(&[PieceKind::T]);
        assert!(state.rotate());
        let active = state.active.unwrap();
        assert_eq!(active.shape, Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]));
        assert_eq!(active.x, 4);
    }

    #[test]
    fn test_rotate_kicks_off_the_right_wall() {
        let mut state = started(&[PieceKind::I]);
        // Vertical I occupies matrix column 2.
        assert!(state.rotate());
        while state.move_right() {}
        assert_eq!(state.active.unwrap().x, 7);

        // Horizontal at x=7 would span columns 7..=10; +1 fails, -1 fits.
        assert!(state.rotate());
        let active = state.active.unwrap();
        assert_eq!(active.x, 6);
        assert_eq!(active.shape.rows(), 4);
        assert!(active.cells().all(|(x, _)| (6..10).contains(&x)));
    }

    #[test]
    fn test_rotate_prefers_positive_kick() {
        let mut state = started(&[PieceKind::T]);
        // Block the rotated T's bottom cell at (5, 2); both +1 and -1 would fit.
        state.board_mut().set(5, 2, Some(PieceKind::Z));
        assert!(state.rotate());
        assert_eq!(state.active.unwrap().x, 5);
    }

    #[test]
    fn test_rotate_rejected_when_no_kick_fits() {
        let mut state = started(&[PieceKind::I]);
        assert!(state.rotate());
        // Vertical I in column 5, rows 0..=3. Fill row 2 around it so every
        // horizontal placement in that row collides.
        fill_row_except(state.board_mut(), 2, 5..6);

        let before = state.active.unwrap();
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_gravity_fires_only_after_interval_is_exceeded() {
        let mut state = started(&[PieceKind::T]);
        assert!(!state.advance(1000));
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(state.drop_timer_ms, 1000);

        assert!(state.advance(1));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_gravity_discards_overshoot() {
        let mut state = started(&[PieceKind::T]);
        assert!(state.advance(5000));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_soft_drop_resets_drop_timer() {
        let mut state = started(&[PieceKind::T]);
        state.advance(600);
        assert!(state.soft_drop());
        assert_eq!(state.drop_timer_ms, 0);
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_advance_to_ignores_time_spent_paused() {
        let mut state = started(&[PieceKind::T]);
        assert!(!state.advance_to(10_000));
        assert!(!state.advance_to(10_900));
        assert!(state.advance_to(11_001));
        assert_eq!(state.active.unwrap().y, 1);

        state.pause();
        assert!(!state.advance_to(50_000));
        state.resume();
        // First resumed frame only sets the baseline.
        assert!(!state.advance_to(90_000));
        assert_eq!(state.drop_timer_ms, 0);
        assert!(!state.advance_to(90_500));
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_single_line_clear_scores_by_level() {
        let mut state = started(&[PieceKind::I]);
        fill_row_except(state.board_mut(), 19, 0..4);
        while state.move_left() {}
        assert_eq!(state.active.unwrap().x, 0);

        assert!(state.hard_drop());
        assert_eq!(state.score, 40);
        assert_eq!(state.lines, 1);
        assert_eq!(state.level, 1);
        assert!(state.board.is_empty());

        let events = state.take_events();
        assert!(events.iter().any(
            |e| matches!(e, GameEvent::LinesCleared { rows } if rows.as_slice() == [19])
        ));
        assert!(events.contains(&GameEvent::ScoreChanged {
            score: 40,
            level: 1,
            lines: 1
        }));
    }

    #[test]
    fn test_four_lines_at_level_two() {
        let mut state = started(&[PieceKind::I]);
        state.lines = 10;
        state.level = 2;
        for y in 16..20 {
            fill_row_except(state.board_mut(), y, 0..1);
        }
        // Vertical I sits in matrix column 2, so x = -2 puts it in board column 0.
        assert!(state.rotate());
        while state.move_left() {}
        assert_eq!(state.active.unwrap().x, -2);

        assert!(state.hard_drop());
        assert_eq!(state.score, 2400);
        assert_eq!(state.lines, 14);
        assert_eq!(state.level, 2);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_level_up_speeds_gravity() {
        let mut state = started(&[PieceKind::I]);
        state.lines = 9;
        fill_row_except(state.board_mut(), 19, 0..4);
        while state.move_left() {}
        state.hard_drop();

        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms, 900);
        assert!(state.take_events().contains(&GameEvent::LevelUp {
            level: 2,
            drop_interval_ms: 900
        }));
    }

    #[test]
    fn test_lock_without_clear_keeps_score() {
        let mut state = started(&[PieceKind::O, PieceKind::T]);
        assert!(state.hard_drop());
        assert_eq!(state.score, 0);
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert!(!state
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::ScoreChanged { .. })));
    }

    #[test]
    fn test_gravity_lock_spawns_next() {
        let mut state = started(&[PieceKind::O, PieceKind::J]);
        // O falls from y=0 to y=18 in 18 ticks; the 19th tick locks it.
        for _ in 0..18 {
            assert!(state.advance(1001));
        }
        assert_eq!(state.active.unwrap().y, 18);
        assert!(state.advance(1001));
        assert_eq!(state.active.unwrap().kind, PieceKind::J);
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut state = started(&[PieceKind::O]);
        for _ in 0..10 {
            assert!(state.hard_drop());
        }
        assert_eq!(state.phase, Phase::GameOver);
        assert!(state.take_events().contains(&GameEvent::GameOver { score: 0 }));

        let board = state.board.clone();
        assert!(!state.advance(5000));
        assert!(!state.hard_drop());
        assert!(!state.toggle_pause());
        assert_eq!(state.board, board);
    }

    #[test]
    fn test_reset_reinitializes_everything() {
        let mut state = started(&[PieceKind::I]);
        fill_row_except(state.board_mut(), 19, 0..4);
        while state.move_left() {}
        state.hard_drop();
        state.board_mut().set(0, 0, Some(PieceKind::S));
        assert!(state.score > 0);

        assert!(state.reset());
        assert_eq!(state.phase, Phase::Ready);
        assert!(state.board.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 1000);
        assert!(state.active.is_some());
        assert!(state.next.is_some());
        assert_eq!(state.session_id, 1);

        // Start keeps the pieces spawned by the reset.
        let active = state.active;
        assert!(state.start());
        assert_eq!(state.active, active);
    }

    #[test]
    fn test_reset_with_start_on_reset_runs_immediately() {
        let config = GameConfig::default().with_start_on_reset(true);
        let mut state = GameState::with_generator(config, PieceGenerator::scripted(vec![PieceKind::T]));
        state.reset();
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_start_after_game_over_restarts() {
        let mut state = started(&[PieceKind::O]);
        for _ in 0..10 {
            state.hard_drop();
        }
        assert!(state.is_game_over());

        assert!(state.start());
        assert_eq!(state.phase, Phase::Running);
        assert!(state.board.is_empty());
        assert_eq!(state.session_id, 1);
    }

    #[test]
    fn test_render_events_are_coalesced() {
        let mut state = started(&[PieceKind::T]);
        state.move_left();
        state.move_left();
        state.move_right();
        assert_eq!(state.take_events(), vec![GameEvent::Render]);
    }

    #[test]
    fn test_apply_action_gates_piece_inputs_by_phase() {
        let mut state = scripted(&[PieceKind::T]);
        for action in [GameAction::MoveLeft, GameAction::HardDrop, GameAction::Rotate] {
            assert!(!state.apply_action(action));
        }
        assert!(state.take_events().is_empty());

        assert!(state.apply_action(GameAction::Start));
        assert!(state.apply_action(GameAction::Pause));
        state.take_events();
        let before = state.active;
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active, before);
        assert!(state.board.is_empty());
        assert!(state.take_events().is_empty());

        assert!(state.apply_action(GameAction::Pause));
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_hard_drop_stops_above_overhang() {
        let mut state = started(&[PieceKind::T]);
        // A single block hangs over an empty column.
        state.board_mut().set(4, 15, Some(PieceKind::Z));
        state.board_mut().set(7, 19, Some(PieceKind::Z));
        let before = state.board.clone();

        let piece = state.active.unwrap();
        let mut landing = piece.y;
        while !state.board.collides(&piece.shape, piece.x, landing + 1) {
            landing += 1;
        }
        assert_eq!(landing, 13);

        assert!(state.hard_drop());
        for (dx, dy) in piece.shape.filled_cells() {
            let (x, y) = (piece.x + dx, landing + dy);
            assert_eq!(before.get(x, y), Some(None));
            assert_eq!(state.board.get(x, y), Some(Some(PieceKind::T)));
        }
        assert_eq!(state.board.get(4, 15), Some(Some(PieceKind::Z)));
        assert_eq!(state.board.get(7, 19), Some(Some(PieceKind::Z)));
        for y in 16..BOARD_HEIGHT as i8 {
            assert_eq!(state.board.get(4, y), Some(None));
        }
        assert_eq!(state.board.filled_count(), 6);
    }
}
