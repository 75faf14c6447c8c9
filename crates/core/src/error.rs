//! Error types for runarchive
//!
//! Two failure families matter to callers:
//! - [`Error::Filesystem`]: a directory or file could not be created or written
//! - [`Error::Serialization`]: a record value has no text rendering
//!
//! The remaining variants cover input parsing and manifest encoding.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// All runarchive errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Directory or file creation / write failure
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A value cannot be rendered as a text cell
    #[error(
        "cannot render {type_name} value in column '{column}' of row {row} of '{artifact}' as text"
    )]
    Serialization {
        /// Artifact being encoded
        artifact: String,
        /// Column holding the value
        column: String,
        /// Zero-based row index
        row: usize,
        /// Type name of the offending value
        type_name: &'static str,
    },

    /// The CSV writer failed while framing records
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Caller-supplied data is malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A run timestamp string does not match `YYYY-MM-DD_HH-MM-SS`
    #[error("invalid run timestamp: {0}")]
    InvalidTimestamp(String),

    /// Run manifest could not be encoded
    #[error("manifest error: {0}")]
    Manifest(String),
}

/// Result type for runarchive operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it concerns
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a filesystem error
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Error::Filesystem { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization { .. })
    }

    /// Path involved in a filesystem error
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Filesystem { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Manifest(e.to_string())
    }
}
