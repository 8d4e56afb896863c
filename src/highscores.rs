//! Current score and the persisted best score
//!
//! The best score is read once when the store is created and written back
//! only when a finished run beats it. A failed write is logged and retried
//! at the next game over.

use crate::persistence::ScoreStorage;

#[derive(Debug)]
pub struct ScoreStore {
    score: u64,
    high_score: u64,
    /// Best score when the current run started
    best_before_run: u64,
    /// `high_score` has not reached storage yet
    unsaved: bool,
    storage: Box<dyn ScoreStorage>,
}

impl ScoreStore {
    /// Load the stored best; missing or malformed data counts as 0
    pub fn load(storage: Box<dyn ScoreStorage>) -> Self {
        let high_score = match storage.read() {
            Ok(Some(text)) => match text.trim().parse::<u64>() {
                Ok(value) => {
                    log::info!("Loaded high score {}", value);
                    value
                }
                Err(_) => {
                    log::warn!("High score data {:?} is not a number, starting from 0", text);
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score stored, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Cannot read high score ({}), starting from 0", e);
                0
            }
        };

        Self {
            score: 0,
            high_score,
            best_before_run: high_score,
            unsaved: false,
            storage,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn increment(&mut self) {
        self.score += 1;
    }

    /// Start a new run from zero
    pub fn reset(&mut self) {
        self.score = 0;
        self.best_before_run = self.high_score;
    }

    /// Whether this run beat the best score it started against
    pub fn is_new_high_score(&self) -> bool {
        self.score > self.best_before_run
    }

    /// Persist the current score if it beats the best.
    ///
    /// Returns true when a write happened and succeeded. Calling again with
    /// the same score is a no-op.
    pub fn save_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.unsaved = true;
        }
        if !self.unsaved {
            return false;
        }

        match self.storage.write(&self.high_score.to_string()) {
            Ok(()) => {
                self.unsaved = false;
                log::info!("High score {} saved", self.high_score);
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score {}: {}", self.high_score, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn store_with(contents: Option<&str>) -> (ScoreStore, MemoryStorage) {
        let storage = match contents {
            Some(text) => MemoryStorage::with_contents(text),
            None => MemoryStorage::new(),
        };
        (ScoreStore::load(Box::new(storage.clone())), storage)
    }

    #[test]
    fn test_missing_or_garbage_loads_as_zero() {
        assert_eq!(store_with(None).0.high_score(), 0);
        assert_eq!(store_with(Some("banana")).0.high_score(), 0);
        assert_eq!(store_with(Some("-3")).0.high_score(), 0);
        assert_eq!(store_with(Some(" 12\n")).0.high_score(), 12);
    }

    #[test]
    fn test_lower_score_leaves_file_alone() {
        let (mut store, storage) = store_with(Some("10"));
        for _ in 0..7 {
            store.increment();
        }
        assert!(!store.save_high_score());
        assert_eq!(storage.contents().as_deref(), Some("10"));
        assert!(!store.is_new_high_score());
    }

    #[test]
    fn test_higher_score_is_saved_once() {
        let (mut store, storage) = store_with(Some("10"));
        for _ in 0..15 {
            store.increment();
        }
        assert!(store.save_high_score());
        assert_eq!(storage.contents().as_deref(), Some("15"));
        assert!(store.is_new_high_score());
        assert_eq!(store.high_score(), 15);

        // Idempotent
        assert!(!store.save_high_score());
        assert_eq!(storage.contents().as_deref(), Some("15"));
    }

    #[test]
    fn test_equal_score_is_not_a_new_best() {
        let (mut store, storage) = store_with(Some("3"));
        for _ in 0..3 {
            store.increment();
        }
        assert!(!store.save_high_score());
        assert!(!store.is_new_high_score());
        assert_eq!(storage.contents().as_deref(), Some("3"));
    }

    #[test]
    fn test_failed_write_is_retried_next_game_over() {
        let (mut store, storage) = store_with(Some("2"));
        storage.set_fail_writes(true);
        for _ in 0..5 {
            store.increment();
        }
        assert!(!store.save_high_score());
        assert_eq!(store.high_score(), 5);
        assert_eq!(storage.contents().as_deref(), Some("2"));

        // Next run scores less, but the pending best still gets written
        storage.set_fail_writes(false);
        store.reset();
        store.increment();
        assert!(store.save_high_score());
        assert_eq!(storage.contents().as_deref(), Some("5"));
        assert!(!store.is_new_high_score());
    }

    #[test]
    fn test_reset_rebases_new_high_score_check() {
        let (mut store, _storage) = store_with(None);
        store.increment();
        store.increment();
        store.save_high_score();
        store.reset();
        assert_eq!(store.score(), 0);
        store.increment();
        assert!(!store.is_new_high_score());
        store.increment();
        store.increment();
        assert!(store.is_new_high_score());
    }
}
