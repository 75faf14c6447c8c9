//! Archiver configuration
//!
//! Controls the names the archiver uses on disk. The defaults produce
//! `<base>/Output/Run_<timestamp>/<name>_<timestamp>.csv`.

use serde::{Deserialize, Serialize};

/// Name of the directory holding every run under the base directory
pub const DEFAULT_OUTPUT_DIR: &str = "Output";
/// Prefix of each run directory name
pub const DEFAULT_RUN_PREFIX: &str = "Run_";
/// Artifact file extension
pub const DEFAULT_EXTENSION: &str = "csv";

/// On-disk naming and format settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiverConfig {
    /// Directory under the base directory that holds all runs
    pub output_dir_name: String,
    /// Prefix prepended to the run timestamp to form the run directory name
    pub run_dir_prefix: String,
    /// Artifact file extension, without the dot
    pub extension: String,
    /// Field delimiter; ASCII other than `"`, CR and LF
    pub delimiter: char,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        ArchiverConfig {
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            run_dir_prefix: DEFAULT_RUN_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            delimiter: runarchive_wire::DEFAULT_DELIMITER,
        }
    }
}
