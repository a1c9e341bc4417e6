use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import error: file is malformed: {0}")]
    Malformed(String),
    #[error("Import error: no valid transactions found in file")]
    NoValidRows,
    #[error("Import error: unsupported file format '{0}', expected .json or .csv")]
    UnsupportedFormat(String),
    #[error("Import error: {0}")]
    Io(#[from] std::io::Error)
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export error: unsupported file format '{0}', expected .json or .csv")]
    UnsupportedFormat(String),
    #[error("Export error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Export error: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error)
}
