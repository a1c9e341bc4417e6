mod amount;
mod errors;
pub mod iso_date;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub use amount::{parse_amount, Amount};
pub use errors::ValidationError;
pub use iso_date::{parse_iso_date, today};

/// Categories offered before the user has recorded anything.
pub const DEFAULT_CATEGORIES: [&str; 7] = ["Food", "Travel", "Shopping", "Bills", "Entertainment", "Health", "Other"];

pub const DEFAULT_CURRENCY: &str = "$";

/// Opaque identifier assigned to a transaction when it is first stored.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        TransactionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        TransactionId(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        TransactionId(value)
    }
}

impl Display for TransactionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Currency symbol a transaction was recorded in. Symbols are tags only, never converted.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(symbol: &str) -> Self {
        let symbol = symbol.trim();

        if symbol.is_empty() {
            Currency::default()
        } else {
            Currency(symbol.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency(DEFAULT_CURRENCY.to_string())
    }
}

impl From<&str> for Currency {
    fn from(value: &str) -> Self {
        Currency::new(value)
    }
}

impl Display for Currency {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
