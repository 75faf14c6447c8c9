//! CSV encoding for artifacts
//!
//! Cell rendering lives here; record framing and quoting are done by
//! `csv::Writer`:
//! - header row of column names in first-seen order
//! - missing fields and nulls render as empty cells
//! - fields containing the delimiter, a quote, CR or LF are quoted,
//!   inner quotes doubled; a record made of one empty field is written `""`
//! - every line ends with `\n`, no trailing delimiter

use csv::{QuoteStyle, Terminator, WriterBuilder};
use runarchive_core::{Artifact, Error, Record, Result, Value};

use super::delimiter_byte;

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: char = ',';

/// Magnitudes at or above this switch to exponent notation
const EXPONENT_UPPER: f64 = 1e16;
/// Non-zero magnitudes below this switch to exponent notation
const EXPONENT_LOWER: f64 = 1e-4;

/// Encode an artifact with the default delimiter
pub fn encode_artifact(artifact: &Artifact) -> Result<String> {
    encode_artifact_with(artifact, DEFAULT_DELIMITER)
}

/// Encode an artifact to delimited text.
///
/// The whole document is built in memory, so a value that cannot be
/// rendered is reported before anything reaches disk. An artifact with no
/// columns encodes to an empty document.
///
/// # Errors
///
/// - `Error::InvalidInput` if `delimiter` is not ASCII, or is `"`, CR or LF
/// - `Error::Serialization` for a value with no text rendering
pub fn encode_artifact_with(artifact: &Artifact, delimiter: char) -> Result<String> {
    let delimiter = delimiter_byte(delimiter).ok_or_else(|| {
        Error::InvalidInput(format!("unsupported delimiter {:?}", delimiter))
    })?;

    let columns = artifact.columns();
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(&columns).map_err(writer_error)?;

    let mut cells = Vec::with_capacity(columns.len());
    for (row_idx, row) in artifact.rows.iter().enumerate() {
        cells.clear();
        for column in &columns {
            cells.push(encode_row_cell(artifact, row, column, row_idx)?);
        }
        writer.write_record(&cells).map_err(writer_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding(e.to_string()))
}

fn writer_error(e: csv::Error) -> Error {
    Error::Encoding(e.to_string())
}

fn encode_row_cell(artifact: &Artifact, row: &Record, column: &str, row_idx: usize) -> Result<String> {
    match row.get(column) {
        None => Ok(String::new()),
        Some(value) => encode_cell(value).ok_or_else(|| Error::Serialization {
            artifact: artifact.name.clone(),
            column: column.to_string(),
            row: row_idx,
            type_name: value.type_name(),
        }),
    }
}

/// Render a value as unquoted cell text.
///
/// Returns `None` for values with no text rendering (`Bytes`, `Array`,
/// `Object`).
pub fn encode_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(encode_float(*f)),
        Value::String(s) => Some(s.clone()),
        Value::Bytes(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Encode a float; NaN is a missing value
fn encode_float(f: f64) -> String {
    if f.is_nan() {
        String::new()
    } else if f == f64::INFINITY {
        "inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format_normal_float(f)
    }
}

/// Format a finite float in its shortest round-trip form.
///
/// Very large and very small magnitudes use exponent notation; everything
/// else is positional with at least one fractional digit.
fn format_normal_float(f: f64) -> String {
    let magnitude = f.abs();
    if magnitude >= EXPONENT_UPPER || (magnitude != 0.0 && magnitude < EXPONENT_LOWER) {
        return format!("{:e}", f);
    }
    let s = f.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}
