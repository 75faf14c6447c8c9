//! CSV decoding
//!
//! Reads delimited text written by [`encode_artifact`](super::encode_artifact)
//! back into text cells. Cells are not re-typed: every value comes back as the
//! string that was written.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

use super::delimiter_byte;
use super::encode::DEFAULT_DELIMITER;

/// Errors that can occur while reading delimited text
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not well-formed delimited data
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    /// Delimiter cannot be used for reading
    #[error("unsupported delimiter {0:?}")]
    Delimiter(char),

    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    /// One-based line of a malformed record, when known
    pub fn line(&self) -> Option<u64> {
        match self {
            DecodeError::Malformed(e) => e.position().map(|p| p.line()),
            _ => None,
        }
    }
}

/// A decoded document: header plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Column names
    pub header: Vec<String>,
    /// Data rows, each a list of cells
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Cell by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.header.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// Read and decode a file with the default delimiter
pub fn read_csv(path: &Path) -> Result<CsvTable, DecodeError> {
    let text = fs::read_to_string(path).map_err(|source| DecodeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_csv(&text, DEFAULT_DELIMITER)
}

/// Decode delimited text. The first record is the header.
///
/// Every record must have as many fields as the header.
pub fn decode_csv(text: &str, delimiter: char) -> Result<CsvTable, DecodeError> {
    let byte = delimiter_byte(delimiter).ok_or(DecodeError::Delimiter(delimiter))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(byte)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(CsvTable { header, rows })
}
