use crate::storage::StorageError;
use crate::types::{TransactionId, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction rejected: {0}")]
    Validation(#[from] ValidationError),
    #[error("Transaction [{id}] was not found")]
    NotFound {
        id: TransactionId
    },
    #[error("Ledger could not be persisted: {0}")]
    Persistence(#[from] StorageError),
    #[error("Ledger could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error)
}

impl LedgerError {
    pub fn not_found(id: &TransactionId) -> Self {
        Self::NotFound { id: id.clone() }
    }
}
