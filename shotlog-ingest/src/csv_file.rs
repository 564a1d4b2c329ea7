//! CSV reading
//!
//! Thin wrapper over the `csv` crate that turns an export file into
//! header-keyed rows. Empty lines are skipped; ragged rows are padded with
//! empty cells so a short row still carries every header key (a present
//! empty cell coerces to 0.0 downstream, a missing column does not).

use crate::error::IngestError;
use std::collections::HashMap;
use std::io::Read;

/// One data line, keyed by header name
pub type RawRow = HashMap<String, String>;

/// A parsed CSV file: the observed header set plus all non-empty data rows
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parse a CSV export
///
/// Errors:
/// - `Parse` for malformed input, carrying the parser's message
/// - `NoHeaders` when the header row is missing or blank
/// - `EmptyFile` when no data rows remain after skipping empty lines
pub fn read_table<R: Read>(reader: R) -> Result<CsvTable, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| IngestError::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeaders);
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| IngestError::Parse(e.to_string()))?;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyFile);
    }

    Ok(CsvTable { headers, rows })
}
