mod errors;
mod export;
mod import;

use std::path::Path;

use time::OffsetDateTime;
use tracing::info;

use crate::models::Transaction;

pub use errors::{ExportError, ImportError};
pub use export::{export_csv, export_json, CSV_HEADER, EXPORT_VERSION};
pub use import::{parse_csv, parse_import, parse_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv
}

impl FileFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        match extension.as_str() {
            "json" => Some(FileFormat::Json),
            "csv" => Some(FileFormat::Csv),
            _ => None
        }
    }
}

/// Reads and parses an import file. Nothing is returned unless the whole file parsed.
pub async fn import_file(path: &Path) -> Result<Vec<Transaction>, ImportError> {
    let format = FileFormat::from_path(path)
        .ok_or_else(|| ImportError::UnsupportedFormat(path.display().to_string()))?;

    let content = tokio::fs::read_to_string(path).await?;
    let transactions = parse_import(&content, format)?;

    info!("Read {} transactions from {}", transactions.len(), path.display());

    Ok(transactions)
}

pub async fn export_file(path: &Path, transactions: &[Transaction], exported_at: OffsetDateTime) -> Result<(), ExportError> {
    let content = match FileFormat::from_path(path) {
        Some(FileFormat::Json) => export_json(transactions, exported_at)?,
        Some(FileFormat::Csv) => export_csv(transactions)?,
        None => return Err(ExportError::UnsupportedFormat(path.display().to_string()))
    };

    tokio::fs::write(path, content).await?;

    info!("Wrote {} transactions to {}", transactions.len(), path.display());

    Ok(())
}
