//! Wire encoding for runarchive
//!
//! This crate implements the on-disk text format of archived artifacts.
//! Record framing and quoting go through the `csv` crate; this crate owns
//! how values become cell text.
//!
//! ## Encoding Rules
//!
//! | Value | Cell text |
//! |-------|-----------|
//! | Null / missing | empty |
//! | Bool | `true` / `false` |
//! | Int | decimal |
//! | Float | shortest form, whole numbers keep `.0`, exponent below `1e-4` or from `1e16`; NaN empty; `inf` / `-inf` |
//! | String | as-is, quoted when it holds the delimiter, `"`, CR or LF |
//! | lone empty field | `""` so the row is not a blank line |
//! | Bytes / Array / Object | rejected |
//!
//! ## Examples
//!
//! ```
//! use runarchive_core::{Artifact, Record};
//! use runarchive_wire::encode_artifact;
//!
//! let artifact = Artifact::with_rows(
//!     "final",
//!     vec![Record::new().with("Name", "John").with("Age", 28)],
//! );
//! assert_eq!(encode_artifact(&artifact).unwrap(), "Name,Age\nJohn,28\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delimited;

pub use delimited::{
    decode_csv, delimiter_byte, encode_artifact, encode_artifact_with, encode_cell, read_csv,
    CsvTable, DecodeError, DEFAULT_DELIMITER,
};
