//! Terminal Tetris runner (default binary).
//!
//! Drives a `GameState` from a fixed-rate frame loop: terminal key events are
//! mapped to actions, wall-clock time is fed through `advance_to`, engine events
//! update the leaderboard rank and line-clear particles, and frames are painted
//! with the framebuffer renderer.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mini_tetris::core::{GameConfig, GameEvent, GameSnapshot, GameState, Randomizer};
use mini_tetris::input::{map_key_event, should_quit};
use mini_tetris::term::{
    fingerprint, FrameBuffer, GameView, HudInfo, ParticleField, Ranking, RenderThrottle,
    TerminalRenderer, Viewport,
};
use mini_tetris::types::{Phase, FRAME_MS};

/// Redraw interval while nothing changes on screen.
const STATIC_REDRAW_MS: u64 = 250;

/// mini-tetris - terminal falling-block game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Piece RNG seed (defaults to the config file's seed, or the clock)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Path to a JSON game config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the 7-bag randomizer instead of uniform draws
    #[arg(long)]
    bag: bool,

    /// Write logs to this file (stdout belongs to the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = FRAME_MS)]
    tick_ms: u32,

    /// Reset goes straight back into a running game
    #[arg(long)]
    start_on_reset: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = load_config(&args)?;
    info!(seed = config.seed, randomizer = ?config.randomizer, "starting");
    let game = GameState::with_config(config)?;

    let tick_ms = if args.tick_ms == 0 {
        warn!("tick-ms 0 is not usable, falling back to {FRAME_MS}");
        FRAME_MS
    } else {
        args.tick_ms
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, Duration::from_millis(tick_ms as u64));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Config file (if any) with command line overrides applied.
fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default().with_seed(clock_seed()),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.bag {
        config = config.with_randomizer(Randomizer::Bag);
    }
    if args.start_on_reset {
        config = config.with_start_on_reset(true);
    }
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Host-side presentation state fed by engine events.
struct Hud {
    ranking: Ranking,
    rank: Option<usize>,
    particles: ParticleField,
}

impl Hud {
    fn new(seed: u32) -> Self {
        let ranking = Ranking::mock(seed);
        let rank = ranking.rank_of(0);
        Self {
            ranking,
            rank,
            particles: ParticleField::new(seed.rotate_left(16)),
        }
    }

    /// Drain engine events. `before` is the snapshot taken before the input or
    /// tick that produced them.
    fn absorb(&mut self, game: &mut GameState, before: &GameSnapshot) {
        for event in game.take_events() {
            match event {
                GameEvent::ScoreChanged { score, .. } => {
                    self.rank = self.ranking.rank_of(score);
                }
                GameEvent::LinesCleared { rows } => {
                    self.particles.burst_cleared(before, rows.as_slice());
                }
                GameEvent::PhaseChanged { to: Phase::Ready, .. }
                | GameEvent::PhaseChanged { from: Phase::GameOver, .. } => {
                    self.particles.clear();
                }
                GameEvent::GameOver { score } => {
                    info!(score, rank = ?self.rank, "final score");
                }
                GameEvent::Render | GameEvent::LevelUp { .. } | GameEvent::PhaseChanged { .. } => {}
            }
        }
    }

    fn info(&self) -> HudInfo {
        HudInfo {
            rank: self.rank,
            show_keys: true,
        }
    }
}

fn run(term: &mut TerminalRenderer, mut game: GameState, tick: Duration) -> Result<()> {
    let view = GameView::default();
    let mut hud = Hud::new(game.config().seed);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let mut next_frame = clock;

    loop {
        // Input until the next frame is due.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            let before = game.snapshot();
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = map_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
            hud.absorb(&mut game, &before);
        }

        let now = Instant::now();
        if now < next_frame {
            continue;
        }
        next_frame += tick;
        if next_frame < now {
            next_frame = now + tick;
        }

        // Gravity.
        let now_ms = clock.elapsed().as_millis() as u64;
        let before = game.snapshot();
        game.advance_to(now_ms);
        hud.absorb(&mut game, &before);
        hud.particles.step();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let snap = game.snapshot();
        let info = hud.info();
        let fp = fingerprint(&(snap, info, w, h));
        if throttle.should_render(now_ms, fp, hud.particles.is_empty()) {
            view.render_into_with_hud(&snap, &info, viewport, &mut fb);
            view.draw_particles(&hud.particles, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_tetris::core::PieceGenerator;
    use mini_tetris::types::PieceKind;

    fn finished_game() -> GameState {
        let mut game = GameState::with_generator(
            GameConfig::default(),
            PieceGenerator::scripted(vec![PieceKind::O]),
        );
        game.start();
        while !game.is_game_over() {
            game.hard_drop();
        }
        game.take_events();
        game
    }

    #[test]
    fn restart_after_game_over_clears_particles() {
        let mut hud = Hud::new(7);
        let mut game = finished_game();
        hud.particles.burst_row(19, &[3u8; 10]);
        assert!(!hud.particles.is_empty());

        let before = game.snapshot();
        assert!(game.start());
        hud.absorb(&mut game, &before);
        assert!(hud.particles.is_empty());
    }

    #[test]
    fn reset_clears_particles() {
        let mut hud = Hud::new(7);
        let mut game = finished_game();
        hud.particles.burst_row(0, &[1u8; 10]);

        let before = game.snapshot();
        game.reset();
        hud.absorb(&mut game, &before);
        assert!(hud.particles.is_empty());
    }
}
