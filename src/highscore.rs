//! High score persistence
//!
//! A single scalar best score, persisted through a string key-value store
//! (LocalStorage in the browser, in-memory elsewhere).

use std::collections::HashMap;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "entangledDashHighScore";

/// String key-value store the engine persists through
pub trait ScoreStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("LocalStorage rejected write to {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}

/// Parse a stored score; anything missing or non-numeric counts as 0
pub fn parse_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.trim().parse::<u64>() {
        Ok(score) => score,
        Err(_) => {
            log::warn!("Ignoring malformed high score {:?}", raw);
            0
        }
    }
}

/// Load the best score (0 when none is stored)
pub fn load(store: &impl ScoreStore) -> u64 {
    let score = parse_score(store.get(HIGH_SCORE_KEY).as_deref());
    log::info!("High score: {}", score);
    score
}

/// Persist the best score
pub fn save(store: &mut impl ScoreStore, score: u64) {
    store.set(HIGH_SCORE_KEY, &score.to_string());
    log::info!("High score saved ({})", score);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(load(&store), 0);
    }

    #[test]
    fn test_malformed_score_is_zero() {
        assert_eq!(parse_score(Some("")), 0);
        assert_eq!(parse_score(Some("abc")), 0);
        assert_eq!(parse_score(Some("-5")), 0);
        assert_eq!(parse_score(Some(" 42 ")), 42);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save(&mut store, 50);
        assert_eq!(store.get(HIGH_SCORE_KEY).as_deref(), Some("50"));
        assert_eq!(load(&store), 50);
    }
}
