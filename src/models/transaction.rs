use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::types::{Amount, Currency, TransactionId, ValidationError};

/// A single recorded expense.
///
/// This is also the shape of one element in the persisted snapshot and in JSON
/// exports, so field names follow the snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned on creation and never changed afterwards.
    pub id: TransactionId,
    pub amount: Amount,
    pub category: String,
    #[serde(with = "crate::types::iso_date")]
    pub date: Date,
    /// Wall-clock time of entry. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub currency: Currency
}

/// A transaction as submitted by the user, before validation and id assignment.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub date: Date,
    pub time: Option<String>,
    pub note: String,
    pub currency: Currency
}

impl NewTransaction {
    pub fn new(amount: Decimal, category: &str, date: Date) -> Self {
        Self {
            amount,
            category: category.to_string(),
            date,
            time: None,
            note: String::new(),
            currency: Currency::default()
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_time(mut self, time: &str) -> Self {
        self.time = Some(time.to_string());
        self
    }

    pub(crate) fn into_transaction(self, id: TransactionId) -> Result<Transaction, ValidationError> {
        let amount = Amount::new(self.amount)?;
        let category = required_category(&self.category)?;

        Ok(Transaction {
            id,
            amount,
            category,
            date: self.date,
            time: self.time,
            note: self.note,
            currency: self.currency
        })
    }
}

/// Replacement values for an edit. The id is always kept, and the recorded time is
/// kept whenever `time` is not resupplied.
#[derive(Debug, Clone)]
pub struct TransactionChanges {
    pub amount: Decimal,
    pub category: String,
    pub date: Date,
    pub note: String,
    pub currency: Currency,
    pub time: Option<String>
}

impl TransactionChanges {
    /// Starts from the current values of `transaction`, so callers only override what changed.
    pub fn from_existing(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount.value(),
            category: transaction.category.clone(),
            date: transaction.date,
            note: transaction.note.clone(),
            currency: transaction.currency.clone(),
            time: None
        }
    }

    pub(crate) fn apply_to(self, existing: &Transaction) -> Result<Transaction, ValidationError> {
        let amount = Amount::new(self.amount)?;
        let category = required_category(&self.category)?;

        Ok(Transaction {
            id: existing.id.clone(),
            amount,
            category,
            date: self.date,
            time: self.time.or_else(|| existing.time.clone()),
            note: self.note,
            currency: self.currency
        })
    }
}

fn required_category(category: &str) -> Result<String, ValidationError> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }

    Ok(category.to_string())
}
