use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::error::DomainError;
use crate::domain::ports::kv_store::KeyValueStore;

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let map = self
            .map
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        map.remove(key);
        Ok(())
    }
}
