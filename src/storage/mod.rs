mod errors;
mod file_storage;
mod keys;
mod memory_storage;

pub use errors::StorageError;
pub use file_storage::FileStorage;
pub use keys::StorageKeys;
pub use memory_storage::MemoryStorage;

/// A local string key-value store. Every value is rewritten whole on `set`.
pub trait Storage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
