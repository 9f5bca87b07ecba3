//! Score and best-score tracking
//!
//! The best score is persisted under a single key as a plain integer and is
//! written back every time the running score beats it.

use crate::consts::BEST_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Current-run score plus the all-time best
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub best: u32,
}

impl ScoreBoard {
    /// Create a board with a known best score
    pub fn with_best(best: u32) -> Self {
        Self { score: 0, best }
    }

    /// Read the best score from the store. Missing or unparsable values
    /// count as zero.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best = match store.get(BEST_SCORE_KEY) {
            Some(raw) => parse_best(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unreadable best score {:?}", raw);
                0
            }),
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        };
        log::info!("Best score: {}", best);
        Self::with_best(best)
    }

    /// Zero the running score for a new run (best is kept)
    pub fn start_run(&mut self) {
        self.score = 0;
    }

    /// Count one cleared obstacle. Returns true if this set a new best.
    pub fn record_point(&mut self, store: &mut impl KeyValueStore) -> bool {
        self.score = self.score.saturating_add(1);
        if self.score > self.best {
            self.best = self.score;
            store.set(BEST_SCORE_KEY, &self.best.to_string());
            true
        } else {
            false
        }
    }
}

/// Parse a stored best score: a non-negative integer, surrounding
/// whitespace allowed
fn parse_best(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}
