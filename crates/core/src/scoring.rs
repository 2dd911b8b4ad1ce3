//! Scoring module - line clear points, leveling and gravity speed
//!
//! Classic rules:
//! - Clearing N lines in one lock awards `LINE_SCORES[N] * level`.
//! - Level is `lines / lines_per_level + 1`.
//! - Gravity interval is `max(min, base - (level - 1) * step)`.

use crate::config::GameConfig;
use crate::types::{LINE_SCORES, MAX_LINES_PER_LOCK, START_LEVEL};

/// Calculate line clear score
/// lines: number of lines cleared in one lock (anything above 4 scores as 4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(MAX_LINES_PER_LOCK)].saturating_mul(level)
}

/// Level for a cumulative line count
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + START_LEVEL
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32, config: &GameConfig) -> u32 {
    let speedup = level
        .saturating_sub(START_LEVEL)
        .saturating_mul(config.drop_step_ms);
    config
        .base_drop_ms
        .saturating_sub(speedup)
        .max(config.min_drop_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 40);
        assert_eq!(calculate_line_score(2, 1), 100);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 1200);
        assert_eq!(calculate_line_score(1, 3), 120);
        assert_eq!(calculate_line_score(4, 2), 2400);
    }

    #[test]
    fn test_line_score_caps_at_four() {
        assert_eq!(calculate_line_score(5, 1), 1200);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(calculate_level(0, 10), 1);
        assert_eq!(calculate_level(9, 10), 1);
        assert_eq!(calculate_level(10, 10), 2);
        assert_eq!(calculate_level(25, 10), 3);
    }

    #[test]
    fn test_drop_interval_curve() {
        let config = GameConfig::default();
        assert_eq!(drop_interval_ms(1, &config), 1000);
        assert_eq!(drop_interval_ms(2, &config), 900);
        assert_eq!(drop_interval_ms(9, &config), 200);
        assert_eq!(drop_interval_ms(10, &config), 100);
        assert_eq!(drop_interval_ms(15, &config), 100);
        assert_eq!(drop_interval_ms(u32::MAX, &config), 100);
    }
}
