//! Error types for the ingestion pipeline

use crate::models::Vendor;
use thiserror::Error;

/// Ingestion pipeline errors
///
/// All variants carry human-readable messages and surface directly to the
/// caller; nothing is retried. A failed upload rolls back and the user
/// re-uploads the full file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Malformed CSV input (wraps the underlying parser message)
    #[error("Error parsing CSV file: {0}")]
    Parse(String),

    /// Parsed output contained zero data rows
    #[error("CSV file appears to be empty or has no valid data")]
    EmptyFile,

    /// Parsed output contained zero columns
    #[error("CSV file has no valid headers")]
    NoHeaders,

    /// File headers share no column with the selected vendor's schema
    #[error(
        "CSV doesn't match the expected format for \"{vendor}\". \
         Make sure the file uses column headers like: {columns}",
        columns = .expected.join(", ")
    )]
    FormatMismatch {
        vendor: Vendor,
        expected: Vec<&'static str>,
    },

    /// Vendor identifier not present in the registry
    #[error("Unsupported vendor: {0}")]
    UnsupportedVendor(String),

    /// Pre-upload validation failure; the whole batch is rejected
    #[error("Row {row_index} is missing required field: {field}")]
    MissingRequiredField { row_index: i64, field: &'static str },

    /// Failure while persisting a batch; the transaction is rolled back
    #[error("Upload failed: {0}")]
    Upload(#[from] sqlx::Error),
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Parse(err.to_string())
    }
}

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;
