//! Competition ranking over a stream of scores.
//!
//! Scores are presented one at a time, usually in descending order. Equal
//! scores share a rank and the next distinct score ranks at 1 + the number
//! of scores seen before it: 1, 2, 2, 4 rather than 1, 2, 2, 3.

/// Decimal places scores are rounded to before comparison.
pub const DEFAULT_PRECISION: u32 = 4;

#[derive(Debug, Clone)]
pub struct ScoreRanker {
    scale: f64,
    last_rank: usize,
    last_value: Option<i64>,
    count: usize,
}

impl ScoreRanker {
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Compare scores rounded to `decimals` places.
    pub fn with_precision(decimals: u32) -> Self {
        Self {
            scale: 10f64.powi(decimals as i32),
            last_rank: 0,
            last_value: None,
            count: 0,
        }
    }

    /// Rank of the next score in the stream.
    pub fn rank(&mut self, score: f64) -> usize {
        self.count += 1;
        let rounded = self.round(score);
        if self.last_value == Some(rounded) {
            return self.last_rank;
        }
        self.last_rank = self.count;
        self.last_value = Some(rounded);
        self.last_rank
    }

    /// Number of scores ranked so far.
    pub fn count(&self) -> usize {
        self.count
    }

    fn round(&self, score: f64) -> i64 {
        (score * self.scale).round() as i64
    }
}

impl Default for ScoreRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks for `scores` in the order given.
pub fn competition_ranks(scores: impl IntoIterator<Item = f64>) -> Vec<usize> {
    let mut ranker = ScoreRanker::new();
    scores.into_iter().map(|score| ranker.rank(score)).collect()
}
