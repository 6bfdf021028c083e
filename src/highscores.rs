//! Persistent leaderboard of the best runs
//!
//! Entries are kept sorted best-first. A higher score ranks higher; on equal
//! scores the run that reached it in fewer ticks wins, and an existing entry
//! beats a newcomer with identical numbers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError};

/// Board size
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Ticks survived
    pub ticks: u64,
    /// Unix seconds
    pub timestamp: u64,
}

impl HighScoreEntry {
    /// True if `self` should be listed above a run with `score` over `ticks`
    fn outranks(&self, score: u64, ticks: u64) -> bool {
        self.score > score || (self.score == score && self.ticks <= ticks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a run would be inserted at, ignoring the board limit
    fn slot(&self, score: u64, ticks: u64) -> usize {
        self.entries.partition_point(|e| e.outranks(score, ticks))
    }

    /// 1-based rank a run would take, or None if it would not make the board.
    /// A zero score never does.
    pub fn potential_rank(&self, score: u64, ticks: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.slot(score, ticks);
        (slot < MAX_HIGH_SCORES).then_some(slot + 1)
    }

    pub fn qualifies(&self, score: u64, ticks: u64) -> bool {
        self.potential_rank(score, ticks).is_some()
    }

    /// Record a finished run, returning its 1-based rank if it made the board
    pub fn add_score(&mut self, score: u64, ticks: u64, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(score, ticks)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                ticks,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the board, starting empty if the file does not exist
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let mut scores = persistence::load_json::<Self>(path)?.unwrap_or_default();
        // Hand-edited files may be unsorted or oversized
        scores
            .entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.ticks.cmp(&b.ticks)));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
