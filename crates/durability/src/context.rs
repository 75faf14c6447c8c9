//! Run context
//!
//! A [`RunContext`] identifies one program execution. It is created once by
//! [`RunArchiver::create_run_context`](crate::RunArchiver::create_run_context)
//! and passed by reference to every save, replacing process-wide run state.
//!
//! ## Invariants
//!
//! - `timestamp` is captured exactly once and never changes
//! - `run_directory` is `base_directory/<output>/<prefix><timestamp>` and
//!   existed when the context was returned
//! - every artifact saved through the context lands directly inside
//!   `run_directory`

use runarchive_core::{Error, Result, RunTimestamp};
use std::path::{Component, Path, PathBuf};

/// Identity and target directory of one run.
///
/// Immutable after creation and cheap to clone; safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    base_directory: PathBuf,
    timestamp: RunTimestamp,
    run_directory: PathBuf,
}

impl RunContext {
    pub(crate) fn new(
        base_directory: PathBuf,
        timestamp: RunTimestamp,
        run_directory: PathBuf,
    ) -> Self {
        RunContext {
            base_directory,
            timestamp,
            run_directory,
        }
    }

    /// Absolute base directory the run was created under
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Timestamp shared by the run directory and every artifact file
    pub fn timestamp(&self) -> RunTimestamp {
        self.timestamp
    }

    /// Directory holding this run's artifacts
    pub fn run_directory(&self) -> &Path {
        &self.run_directory
    }

    /// File name for an artifact: `{name}_{timestamp}.{extension}`
    pub fn file_name(&self, name: &str, extension: &str) -> String {
        format!("{}_{}.{}", name, self.timestamp, extension)
    }

    /// Target path for an artifact. Does not touch the filesystem.
    ///
    /// Names that would resolve outside the run directory are rejected.
    pub fn artifact_path(&self, name: &str, extension: &str) -> Result<PathBuf> {
        validate_artifact_name(name)?;
        Ok(self.run_directory.join(self.file_name(name, extension)))
    }
}

fn validate_artifact_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("artifact name is empty".to_string()));
    }
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidInput(format!(
            "artifact name {name:?} must be a plain file name"
        )));
    }
    Ok(())
}
