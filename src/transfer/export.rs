use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::models::Transaction;
use crate::transfer::errors::ExportError;

pub const EXPORT_VERSION: &str = "1.0";
pub const CSV_HEADER: [&str; 5] = ["Date", "Amount", "Category", "Note", "Currency"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSnapshot<'a> {
    expenses: &'a [Transaction],
    export_date: String,
    version: &'static str
}

pub fn export_json(transactions: &[Transaction], exported_at: OffsetDateTime) -> Result<String, ExportError> {
    let snapshot = ExportSnapshot {
        expenses: transactions,
        export_date: exported_at.format(&Rfc3339)?,
        version: EXPORT_VERSION
    };

    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Every field is quoted; embedded quotes are doubled.
pub fn export_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        writer.write_record([
            transaction.date.to_string(),
            transaction.amount.to_string(),
            transaction.category.clone(),
            transaction.note.clone(),
            transaction.currency.to_string()
        ])?;
    }

    let bytes = writer.into_inner().map_err(|error| ExportError::Io(error.into_error()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
