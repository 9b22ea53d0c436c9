//! Best score record
//!
//! Stored as plain decimal text under `persistence::HIGH_SCORE_KEY`.

use crate::persistence::{HIGH_SCORE_KEY, Storage};

/// Best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Raise the record if `score` beats it. Returns true on a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Parse stored text; empty or invalid text counts as zero
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match trimmed.parse() {
            Ok(best) => Self { best },
            Err(e) => {
                log::warn!("Ignoring invalid high score {trimmed:?}: {e}");
                Self::default()
            }
        }
    }

    pub fn load(store: &impl Storage) -> Self {
        match store.read(HIGH_SCORE_KEY) {
            Ok(Some(text)) => {
                let score = Self::parse(&text);
                log::info!("Loaded high score {}", score.best);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read high score ({e})");
                Self::default()
            }
        }
    }

    /// Save the record; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut impl Storage) {
        match store.write(HIGH_SCORE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {e}"),
        }
    }
}
