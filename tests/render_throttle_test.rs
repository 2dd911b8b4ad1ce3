use mini_tetris::core::GameState;
use mini_tetris::term::{fingerprint, Ranking, RenderThrottle};

#[test]
fn render_throttle_redraws_when_the_snapshot_changes() {
    let mut game = GameState::new(4);
    game.start();
    let mut t = RenderThrottle::new(250);

    assert!(t.should_render(0, fingerprint(&game.snapshot()), true));
    assert!(!t.should_render(16, fingerprint(&game.snapshot()), true));

    game.move_left();
    assert!(t.should_render(32, fingerprint(&game.snapshot()), true));
}

#[test]
fn render_throttle_gravity_timer_counts_as_change() {
    let mut game = GameState::new(4);
    game.start();
    let mut t = RenderThrottle::new(250);

    assert!(t.should_render(0, fingerprint(&game.snapshot()), true));
    game.advance(16);
    assert!(t.should_render(16, fingerprint(&game.snapshot()), true));
}

#[test]
fn render_throttle_paused_game_is_static() {
    let mut game = GameState::new(4);
    game.start();
    game.pause();
    let mut t = RenderThrottle::new(250);

    let fp = fingerprint(&game.snapshot());
    assert!(t.should_render(0, fp, true));
    game.advance(16);
    assert!(!t.should_render(16, fingerprint(&game.snapshot()), true));
    assert!(t.should_render(300, fingerprint(&game.snapshot()), true));
}

#[test]
fn ranking_improves_with_score() {
    let ranking = Ranking::mock(11);
    let low = ranking.rank_of(1_000).unwrap_or(ranking.len() + 1);
    let high = ranking.rank_of(90_000).unwrap_or(ranking.len() + 1);
    assert!(high <= low);
    assert_eq!(ranking.rank_of(u32::MAX), Some(1));
}
