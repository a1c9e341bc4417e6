use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error for key [{key}]: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error
    }
}

impl StorageError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io { key: key.to_string(), source }
    }
}
