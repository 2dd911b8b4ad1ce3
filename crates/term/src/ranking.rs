//! Mock leaderboard shown next to the board.
//!
//! There is no server: the table is 100 pseudo-random scores generated from a
//! seed, kept sorted best-first.

use crate::core::SimpleRng;

/// Number of generated leaderboard entries.
pub const RANKING_SIZE: usize = 100;

/// Upper bound (exclusive) of generated scores.
pub const RANKING_MAX_SCORE: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// Scores, highest first.
    scores: Vec<u32>,
}

impl Ranking {
    /// Generate the mock table from a seed.
    pub fn mock(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let scores = (0..RANKING_SIZE)
            .map(|_| ((rng.next_f32() * RANKING_MAX_SCORE as f32) as u32).min(RANKING_MAX_SCORE - 1))
            .collect();
        Self::from_scores(scores)
    }

    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Self { scores }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// 1-based position of the first entry not above `score`.
    ///
    /// `None` when `score` is below every entry.
    pub fn rank_of(&self, score: u32) -> Option<usize> {
        self.scores.iter().position(|&s| s <= score).map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_table_is_sorted_and_in_range() {
        let ranking = Ranking::mock(42);
        assert_eq!(ranking.len(), RANKING_SIZE);
        assert!(ranking.scores().windows(2).all(|w| w[0] >= w[1]));
        assert!(ranking.scores().iter().all(|&s| s < RANKING_MAX_SCORE));
    }

    #[test]
    fn mock_table_is_deterministic() {
        assert_eq!(Ranking::mock(7), Ranking::mock(7));
    }

    #[test]
    fn rank_counts_from_one() {
        let ranking = Ranking::from_scores(vec![100, 500, 300]);
        assert_eq!(ranking.rank_of(1000), Some(1));
        assert_eq!(ranking.rank_of(500), Some(1));
        assert_eq!(ranking.rank_of(499), Some(2));
        assert_eq!(ranking.rank_of(100), Some(3));
        assert_eq!(ranking.rank_of(99), None);
    }
}
