//! Run manifest
//!
//! `MANIFEST.json` summarises one run: which artifacts were written, their
//! row counts, columns and checksums, and which artifacts failed.
//!
//! ```text
//! Output/Run_2024-01-01_10-00-00/
//! ├── MANIFEST.json
//! ├── final_dataframe_2024-01-01_10-00-00.csv
//! └── merged_data_2024-01-01_10-00-00.csv
//! ```

use crate::batch::BatchReport;
use crate::context::RunContext;
use runarchive_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Current manifest format version
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// Manifest file name inside a run directory
pub const MANIFEST_FILE: &str = "MANIFEST.json";

/// Compute xxh3 hash and return as lowercase hex
pub fn xxh3_hex(data: &[u8]) -> String {
    format!("{:016x}", xxhash_rust::xxh3::xxh3_64(data))
}

/// Contents of `MANIFEST.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Format version
    pub format_version: u32,
    /// Run timestamp, `YYYY-MM-DD_HH-MM-SS`
    pub timestamp: String,
    /// Artifacts written
    pub artifacts: Vec<ManifestEntry>,
    /// Artifacts that failed to save
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ManifestFailure>,
}

/// One written artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Artifact name
    pub name: String,
    /// File name relative to the run directory
    pub file: String,
    /// Data rows
    pub rows: usize,
    /// Header columns
    pub columns: Vec<String>,
    /// xxh3 of the file bytes
    pub checksum: String,
}

/// One failed artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFailure {
    /// Artifact name
    pub name: String,
    /// Error message
    pub error: String,
}

impl RunManifest {
    /// Build a manifest from a batch report
    pub fn from_report(ctx: &RunContext, report: &BatchReport) -> Self {
        let artifacts = report
            .saved()
            .map(|s| ManifestEntry {
                name: s.name.clone(),
                file: s
                    .path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                rows: s.rows,
                columns: s.columns.clone(),
                checksum: s.checksum.clone(),
            })
            .collect();
        let failures = report
            .failures()
            .map(|f| ManifestFailure {
                name: f.name.clone(),
                error: f.error.to_string(),
            })
            .collect();

        RunManifest {
            format_version: MANIFEST_FORMAT_VERSION,
            timestamp: ctx.timestamp().to_string(),
            artifacts,
            failures,
        }
    }

    /// Write `MANIFEST.json` into the run directory, returning its path
    pub fn write(&self, ctx: &RunContext) -> Result<PathBuf> {
        let path = ctx.run_directory().join(MANIFEST_FILE);
        let mut json = serde_json::to_vec_pretty(self)?;
        json.push(b'\n');
        fs::write(&path, &json).map_err(|e| Error::filesystem(&path, e))?;
        info!(
            path = %path.display(),
            artifacts = self.artifacts.len(),
            failures = self.failures.len(),
            "Wrote run manifest"
        );
        Ok(path)
    }

    /// Read a manifest file
    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| Error::filesystem(path, e))?;
        let manifest: RunManifest = serde_json::from_slice(&data)?;
        if manifest.format_version != MANIFEST_FORMAT_VERSION {
            return Err(Error::Manifest(format!(
                "unsupported manifest version {}",
                manifest.format_version
            )));
        }
        Ok(manifest)
    }
}
