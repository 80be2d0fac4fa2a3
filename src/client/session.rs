//! Persistence of the filter state between page loads

use std::collections::HashMap;
use thiserror::Error;

use super::state::FilterState;

/// Storage key for the filter state
pub const SESSION_KEY: &str = "blogState";

#[derive(Debug, Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);

/// A string key/value store such as the browser's session storage
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves [`FilterState`]. Storage failures are never surfaced.
pub struct Session<S: SessionStorage> {
    storage: S,
}

impl<S: SessionStorage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The saved state, or the default when none is saved or it is unreadable
    pub fn load(&self) -> FilterState {
        FilterState::restore(self.storage.get_item(SESSION_KEY).as_deref())
    }

    pub fn save(&mut self, state: &FilterState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("Failed to serialize filter state: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(SESSION_KEY, &json) {
            tracing::debug!("Failed to save filter state: {}", e);
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
