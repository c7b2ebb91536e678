//! Best score persistence
//!
//! The simulation only sees [`ScoreStore`]: read once at startup, written
//! whenever a run beats the cached best.

use crate::persistence::KeyValueStore;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "flappyCrabHighScore";

/// Port for the single persisted best score
pub trait ScoreStore {
    /// Stored best, or 0 when missing or unreadable
    fn get(&self) -> u32;
    /// Record a new best
    fn set(&mut self, score: u32);
}

/// Best score kept as a decimal string in any key-value backend
#[derive(Debug, Clone)]
pub struct StoredBestScore<S> {
    store: S,
}

impl<S: KeyValueStore> StoredBestScore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store, shared with settings
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: KeyValueStore> ScoreStore for StoredBestScore<S> {
    fn get(&self) -> u32 {
        match self.store.get_item(BEST_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Stored best score {:?} is not a number, using 0", raw);
                0
            }),
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        }
    }

    fn set(&mut self, score: u32) {
        match self.store.set_item(BEST_SCORE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", score),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disabled".into()))
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disabled".into()))
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn test_missing_value_is_zero() {
        let best = StoredBestScore::new(MemoryStore::new());
        assert_eq!(best.get(), 0);
    }

    #[test]
    fn test_set_then_get() {
        let mut best = StoredBestScore::new(MemoryStore::new());
        best.set(17);
        assert_eq!(best.get(), 17);
        let raw = best.store_mut().get_item(BEST_SCORE_KEY).unwrap();
        assert_eq!(raw.as_deref(), Some("17"));
    }

    #[test]
    fn test_unparseable_value_is_zero() {
        let mut store = MemoryStore::new();
        store.set_item(BEST_SCORE_KEY, "lots").unwrap();
        assert_eq!(StoredBestScore::new(store).get(), 0);

        let mut store = MemoryStore::new();
        store.set_item(BEST_SCORE_KEY, "-3").unwrap();
        assert_eq!(StoredBestScore::new(store).get(), 0);
    }

    #[test]
    fn test_broken_backend_never_panics() {
        let mut best = StoredBestScore::new(BrokenStore);
        assert_eq!(best.get(), 0);
        best.set(5);
        assert_eq!(best.get(), 0);
    }
}
