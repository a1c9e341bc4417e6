use crate::storage::{Storage, StorageError};
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local storage, for tests and for hosts that persist elsewhere.
#[derive(Default)]
pub struct MemoryStorage {
    cache: Arc<DashMap<String, String>>
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new())
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cache.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.cache.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
