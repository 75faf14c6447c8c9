//! Run discovery
//!
//! Finds earlier runs under an output directory. Only directories named
//! `<prefix><timestamp>` with a parseable timestamp count as runs.

use runarchive_core::{Error, Result, RunTimestamp};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A run directory found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEntry {
    /// Run timestamp parsed from the directory name
    pub timestamp: RunTimestamp,
    /// Run directory
    pub path: PathBuf,
}

/// Run directories inside `output_directory`, oldest first.
///
/// A missing output directory means no runs yet and yields an empty list.
pub fn list_runs_in(output_directory: &Path, prefix: &str) -> Result<Vec<RunEntry>> {
    let entries = match fs::read_dir(output_directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::filesystem(output_directory, e)),
    };

    let mut runs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::filesystem(output_directory, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(suffix) = file_name.to_str().and_then(|n| n.strip_prefix(prefix)) else {
            continue;
        };
        match suffix.parse::<RunTimestamp>() {
            Ok(timestamp) => runs.push(RunEntry { timestamp, path }),
            Err(_) => debug!(path = %path.display(), "Skipping non-run directory"),
        }
    }

    runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(runs)
}
