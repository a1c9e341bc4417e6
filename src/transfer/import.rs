use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Transaction;
use crate::transfer::errors::ImportError;
use crate::transfer::FileFormat;
use crate::types::{parse_iso_date, Amount, Currency, TransactionId};

/// A record as found in an import file, before coercion.
///
/// Every field is optional here; a record only becomes a transaction once it has a
/// positive amount, a category and a valid date.
#[derive(Debug, Default, Deserialize)]
struct ImportedRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    currency: Option<String>
}

impl ImportedRecord {
    fn into_transaction(self) -> Option<Transaction> {
        let amount = match self.amount? {
            Value::Number(number) => number.to_string().parse::<Amount>().ok()?,
            Value::String(text) => text.parse::<Amount>().ok()?,
            _ => return None
        };

        let category = self.category.map(|category| category.trim().to_string()).filter(|category| !category.is_empty())?;
        let date = parse_iso_date(&self.date?).ok()?;

        let id = self.id
            .filter(|id| !id.trim().is_empty())
            .map(TransactionId::from)
            .unwrap_or_else(TransactionId::generate);

        Some(Transaction {
            id,
            amount,
            category,
            date,
            time: self.time.filter(|time| !time.trim().is_empty()),
            note: self.note.unwrap_or_default(),
            currency: Currency::new(self.currency.as_deref().unwrap_or_default())
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Wrapped { expenses: Vec<Value> },
    Bare(Vec<Value>)
}

/// Parses either a `{ "expenses": [...] }` snapshot or a bare array of records.
pub fn parse_json(content: &str) -> Result<Vec<Transaction>, ImportError> {
    let payload: JsonPayload = serde_json::from_str(content)
        .map_err(|error| ImportError::Malformed(error.to_string()))?;

    let entries = match payload {
        JsonPayload::Wrapped { expenses } => expenses,
        JsonPayload::Bare(entries) => entries
    };

    let total = entries.len();
    let transactions: Vec<Transaction> = entries.into_iter()
        .filter_map(|entry| serde_json::from_value::<ImportedRecord>(entry).ok())
        .filter_map(ImportedRecord::into_transaction)
        .collect();

    finish(transactions, total)
}

/// Parses `Date,Amount,Category,Note[,Currency]` rows. Columns are read by position.
pub fn parse_csv(content: &str) -> Result<Vec<Transaction>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut transactions = Vec::new();
    let mut total = 0;

    for result in reader.records() {
        total += 1;

        match result {
            Ok(row) => {
                if let Some(transaction) = record_from_row(&row).into_transaction() {
                    transactions.push(transaction);
                }
            }
            Err(error) => {
                warn!("CSV import row could not be read: {error}");
            }
        }
    }

    finish(transactions, total)
}

pub fn parse_import(content: &str, format: FileFormat) -> Result<Vec<Transaction>, ImportError> {
    match format {
        FileFormat::Json => parse_json(content),
        FileFormat::Csv => parse_csv(content)
    }
}

fn record_from_row(row: &StringRecord) -> ImportedRecord {
    let field = |index: usize| row.get(index).filter(|value| !value.is_empty()).map(str::to_string);

    ImportedRecord {
        id: None,
        amount: field(1).map(Value::String),
        category: field(2),
        date: field(0),
        time: None,
        note: field(3),
        currency: field(4)
    }
}

fn finish(transactions: Vec<Transaction>, total: usize) -> Result<Vec<Transaction>, ImportError> {
    let skipped = total - transactions.len();

    if skipped > 0 {
        warn!("Skipped {skipped} of {total} imported records missing an amount, category or date");
    }

    if transactions.is_empty() {
        return Err(ImportError::NoValidRows);
    }

    debug!("Parsed {} transactions for import", transactions.len());

    Ok(transactions)
}
