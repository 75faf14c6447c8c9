//! Run archiver
//!
//! Materializes one execution's output tree and writes artifacts into it.
//!
//! ## Usage
//!
//! ```ignore
//! let archiver = RunArchiver::new();
//! let ctx = archiver.create_run_context("/tmp/app")?;
//! let path = archiver.save_artifact(&ctx, &artifact)?;
//! let report = archiver.save_batch(&ctx, &artifacts);
//! archiver.write_manifest(&ctx, &report)?;
//! ```
//!
//! ## Failure policy
//!
//! - Directory creation failures are fatal and returned immediately.
//! - Artifact saves are independent. Batch operations record a failure and
//!   carry on with the next artifact.
//! - Nothing is retried.

use crate::batch::{ArtifactOutcome, BatchReport, FailedArtifact, SavedArtifact};
use crate::clock::{Clock, SystemClock};
use crate::config::ArchiverConfig;
use crate::context::RunContext;
use crate::manifest::{xxh3_hex, RunManifest};
use crate::runs::{list_runs_in, RunEntry};
use rayon::prelude::*;
use runarchive_core::{Artifact, Error, Result};
use runarchive_wire::encode_artifact_with;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Creates run contexts and persists artifacts into them.
///
/// Holds no per-run state; one archiver can serve any number of contexts
/// from any number of threads.
#[derive(Clone)]
pub struct RunArchiver {
    config: ArchiverConfig,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RunArchiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunArchiver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RunArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl RunArchiver {
    /// Archiver with default naming and the system clock
    pub fn new() -> Self {
        RunArchiverBuilder::new().build()
    }

    /// Start configuring an archiver
    pub fn builder() -> RunArchiverBuilder {
        RunArchiverBuilder::new()
    }

    /// Replace the clock, keeping the configuration
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ArchiverConfig {
        &self.config
    }

    /// Create the output tree for one run.
    ///
    /// Ensures `<base>/<output>` exists, captures the timestamp once, then
    /// ensures `<base>/<output>/<prefix><timestamp>` exists. A relative
    /// `base_directory` is resolved against the current directory.
    ///
    /// # Errors
    ///
    /// `Error::Filesystem` if either directory cannot be created or exists
    /// as something other than a directory.
    pub fn create_run_context(&self, base_directory: impl AsRef<Path>) -> Result<RunContext> {
        let base_directory = absolutize(base_directory.as_ref())?;

        let output_directory = base_directory.join(&self.config.output_dir_name);
        ensure_directory(&output_directory)?;

        let timestamp = self.clock.now();
        let run_directory =
            output_directory.join(format!("{}{}", self.config.run_dir_prefix, timestamp));
        ensure_directory(&run_directory)?;

        info!(
            run_directory = %run_directory.display(),
            timestamp = %timestamp,
            "Created run context"
        );

        Ok(RunContext::new(base_directory, timestamp, run_directory))
    }

    /// Persist one artifact into the run directory, returning the absolute path.
    ///
    /// The file is `{name}_{timestamp}.{extension}`; an existing file with
    /// that name is overwritten.
    ///
    /// # Errors
    ///
    /// - `Error::Serialization` if a value has no text rendering. Nothing is
    ///   written in that case.
    /// - `Error::Filesystem` if the file cannot be written, including when
    ///   the run directory was removed after the context was created.
    /// - `Error::InvalidInput` if the name is not a plain file name or the
    ///   configured delimiter is unusable.
    pub fn save_artifact(&self, ctx: &RunContext, artifact: &Artifact) -> Result<PathBuf> {
        self.write_artifact(ctx, artifact).map(|saved| saved.path)
    }

    /// Save every artifact in order, isolating failures.
    pub fn save_batch(&self, ctx: &RunContext, artifacts: &[Artifact]) -> BatchReport {
        let outcomes = artifacts
            .iter()
            .map(|artifact| self.outcome(ctx, artifact))
            .collect();
        self.finish_batch(ctx, outcomes)
    }

    /// Save every artifact concurrently, isolating failures.
    ///
    /// Outcomes are reported in input order. Artifacts sharing a name target
    /// the same file, so they are saved one after another in input order and
    /// the last one wins, as in [`save_batch`](Self::save_batch). Distinct
    /// names are saved concurrently.
    pub fn save_batch_parallel(&self, ctx: &RunContext, artifacts: &[Artifact]) -> BatchReport {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of: HashMap<&str, usize> = HashMap::new();
        for (idx, artifact) in artifacts.iter().enumerate() {
            let group = *group_of.entry(artifact.name.as_str()).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(idx);
        }

        let mut indexed: Vec<(usize, ArtifactOutcome)> = groups
            .par_iter()
            .flat_map_iter(|group| {
                group
                    .iter()
                    .map(move |&idx| (idx, self.outcome(ctx, &artifacts[idx])))
            })
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);

        let outcomes = indexed.into_iter().map(|(_, outcome)| outcome).collect();
        self.finish_batch(ctx, outcomes)
    }

    /// Write `MANIFEST.json` for a batch into the run directory.
    pub fn write_manifest(&self, ctx: &RunContext, report: &BatchReport) -> Result<PathBuf> {
        RunManifest::from_report(ctx, report).write(ctx)
    }

    /// Runs found under `base_directory`, oldest first.
    pub fn list_runs(&self, base_directory: impl AsRef<Path>) -> Result<Vec<RunEntry>> {
        let output_directory = base_directory.as_ref().join(&self.config.output_dir_name);
        list_runs_in(&output_directory, &self.config.run_dir_prefix)
    }

    fn outcome(&self, ctx: &RunContext, artifact: &Artifact) -> ArtifactOutcome {
        match self.write_artifact(ctx, artifact) {
            Ok(saved) => ArtifactOutcome::Saved(saved),
            Err(error) => {
                warn!(artifact = %artifact.name, error = %error, "Artifact save failed");
                ArtifactOutcome::Failed(FailedArtifact {
                    name: artifact.name.clone(),
                    error,
                })
            }
        }
    }

    fn finish_batch(&self, ctx: &RunContext, outcomes: Vec<ArtifactOutcome>) -> BatchReport {
        let report = BatchReport::new(outcomes);
        info!(
            run_directory = %ctx.run_directory().display(),
            saved = report.saved_count(),
            failed = report.failed_count(),
            "Batch finished"
        );
        report
    }

    fn write_artifact(&self, ctx: &RunContext, artifact: &Artifact) -> Result<SavedArtifact> {
        let path = ctx.artifact_path(&artifact.name, &self.config.extension)?;
        let text = encode_artifact_with(artifact, self.config.delimiter)?;

        fs::write(&path, text.as_bytes()).map_err(|e| Error::filesystem(&path, e))?;

        info!(
            artifact = %artifact.name,
            rows = artifact.row_count(),
            path = %path.display(),
            "Saved artifact"
        );

        Ok(SavedArtifact {
            name: artifact.name.clone(),
            rows: artifact.row_count(),
            columns: artifact.columns().into_iter().map(str::to_string).collect(),
            checksum: xxh3_hex(text.as_bytes()),
            path,
        })
    }
}

/// Builder for [`RunArchiver`]
pub struct RunArchiverBuilder {
    config: ArchiverConfig,
    clock: Arc<dyn Clock>,
}

impl Default for RunArchiverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RunArchiverBuilder {
    /// Default configuration and the system clock
    pub fn new() -> Self {
        RunArchiverBuilder {
            config: ArchiverConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ArchiverConfig) -> Self {
        self.config = config;
        self
    }

    /// Name of the directory holding all runs
    pub fn output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_dir_name = name.into();
        self
    }

    /// Prefix of each run directory
    pub fn run_dir_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.run_dir_prefix = prefix.into();
        self
    }

    /// Artifact file extension, without the dot
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// Field delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Time source for run timestamps
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Finish building
    pub fn build(self) -> RunArchiver {
        RunArchiver {
            config: self.config,
            clock: self.clock,
        }
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|e| Error::filesystem(path, e))?;
    Ok(cwd.join(path))
}

/// Idempotent directory creation that refuses non-directories.
fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(Error::filesystem(
                path,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "path exists and is not a directory",
                ),
            ))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::filesystem(path, e)),
    }

    fs::create_dir_all(path).map_err(|e| Error::filesystem(path, e))?;
    debug!(path = %path.display(), "Created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use runarchive_core::{Record, RunTimestamp, Value};
    use std::sync::atomic::{AtomicI64, Ordering};
    use tempfile::TempDir;

    fn ts(s: &str) -> RunTimestamp {
        s.parse().unwrap()
    }

    fn fixed(s: &str) -> RunArchiver {
        RunArchiver::builder().clock(FixedClock(ts(s))).build()
    }

    /// Advances one second per call
    struct SteppingClock {
        start: RunTimestamp,
        calls: AtomicI64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> RunTimestamp {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            RunTimestamp::from_naive(self.start.as_naive() + chrono::Duration::seconds(n))
        }
    }

    fn sample() -> Artifact {
        Artifact::with_rows(
            "sample",
            vec![
                Record::new().with("A", 1).with("B", 4),
                Record::new().with("A", 2).with("B", 5),
            ],
        )
    }

    #[test]
    fn test_create_run_context_layout() {
        let dir = TempDir::new().unwrap();
        let ctx = fixed("2024-01-01_10-00-00")
            .create_run_context(dir.path())
            .unwrap();

        assert_eq!(ctx.base_directory(), dir.path());
        assert_eq!(
            ctx.run_directory(),
            dir.path().join("Output").join("Run_2024-01-01_10-00-00")
        );
        assert!(ctx.run_directory().is_dir());
        assert_eq!(ctx.timestamp().to_string(), "2024-01-01_10-00-00");
    }

    #[test]
    fn test_create_run_context_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let a = archiver.create_run_context(dir.path()).unwrap();
        let b = archiver.create_run_context(dir.path()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_contexts_one_second_apart_differ() {
        let dir = TempDir::new().unwrap();
        let archiver = RunArchiver::builder()
            .clock(SteppingClock {
                start: ts("2024-01-01_10-00-59"),
                calls: AtomicI64::new(0),
            })
            .build();
        let a = archiver.create_run_context(dir.path()).unwrap();
        let b = archiver.create_run_context(dir.path()).unwrap();
        assert_ne!(a.run_directory(), b.run_directory());
        assert_eq!(b.timestamp().to_string(), "2024-01-01_10-01-00");
    }

    #[test]
    fn test_output_path_is_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Output"), b"not a dir").unwrap();
        let err = fixed("2024-01-01_10-00-00")
            .create_run_context(dir.path())
            .unwrap_err();
        assert!(err.is_filesystem());
        assert_eq!(err.path(), Some(dir.path().join("Output").as_path()));
    }

    #[test]
    fn test_run_directory_path_is_file() {
        let dir = TempDir::new().unwrap();
        let run_dir = dir.path().join("Output").join("Run_2024-01-01_10-00-00");
        fs::create_dir(dir.path().join("Output")).unwrap();
        fs::write(&run_dir, b"not a dir").unwrap();

        let err = fixed("2024-01-01_10-00-00")
            .create_run_context(dir.path())
            .unwrap_err();
        assert!(err.is_filesystem());
        assert_eq!(err.path(), Some(run_dir.as_path()));
        assert!(run_dir.is_file());
    }

    #[test]
    fn test_relative_base_is_absolutized() {
        let archiver = fixed("2024-01-01_10-00-00");
        let dir = TempDir::new_in(".").unwrap();
        let name = dir.path().file_name().unwrap().to_owned();
        let ctx = archiver.create_run_context(&name).unwrap();
        assert!(ctx.base_directory().is_absolute());
        assert!(ctx.run_directory().is_dir());
    }

    #[test]
    fn test_save_artifact_writes_file() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();

        let path = archiver.save_artifact(&ctx, &sample()).unwrap();
        assert_eq!(path.parent(), Some(ctx.run_directory()));
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "sample_2024-01-01_10-00-00.csv"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "A,B\n1,4\n2,5\n");
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();

        let first = archiver.save_artifact(&ctx, &sample()).unwrap();
        let second = archiver
            .save_artifact(
                &ctx,
                &Artifact::with_rows("sample", vec![Record::new().with("Z", 9)]),
            )
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "Z\n9\n");
    }

    #[test]
    fn test_serialization_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();

        let bad = Artifact::with_rows(
            "bad",
            vec![Record::new().with("x", Value::Array(vec![Value::Int(1)]))],
        );
        let err = archiver.save_artifact(&ctx, &bad).unwrap_err();
        assert!(err.is_serialization());
        assert!(!ctx
            .run_directory()
            .join("bad_2024-01-01_10-00-00.csv")
            .exists());
    }

    #[test]
    fn test_deleted_run_directory_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();
        fs::remove_dir_all(ctx.run_directory()).unwrap();

        let err = archiver.save_artifact(&ctx, &sample()).unwrap_err();
        assert!(err.is_filesystem());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();

        let artifacts = vec![
            sample(),
            Artifact::with_rows("bad", vec![Record::new().with("b", vec![0u8])]),
            Artifact::with_rows("last", vec![Record::new().with("k", "v")]),
        ];
        let report = archiver.save_batch(&ctx, &artifacts);

        assert_eq!(report.len(), 3);
        assert_eq!(report.saved_count(), 2);
        assert!(!report.is_complete());
        assert!(report.outcomes()[1].error().unwrap().is_serialization());
        assert!(report.outcomes()[2].path().unwrap().exists());
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();

        let artifacts: Vec<Artifact> = (0..16)
            .map(|i| {
                Artifact::with_rows(
                    format!("part{i}"),
                    (0..i).map(|r| Record::new().with("row", r)).collect(),
                )
            })
            .collect();

        let sequential = archiver.save_batch(&ctx, &artifacts);
        let parallel = archiver.save_batch_parallel(&ctx, &artifacts);

        assert!(parallel.is_complete());
        let seq: Vec<_> = sequential.saved().cloned().collect();
        let par: Vec<_> = parallel.saved().cloned().collect();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_parallel_batch_duplicate_names_last_wins() {
        let dir = TempDir::new().unwrap();
        let archiver = fixed("2024-01-01_10-00-00");
        let ctx = archiver.create_run_context(dir.path()).unwrap();

        let artifacts: Vec<Artifact> = (0..8)
            .map(|i| {
                Artifact::with_rows(
                    if i % 2 == 0 { "shared" } else { "other" },
                    vec![Record::new().with("v", i)],
                )
            })
            .collect();
        let report = archiver.save_batch_parallel(&ctx, &artifacts);

        assert!(report.is_complete());
        let names: Vec<&str> = report.outcomes().iter().map(|o| o.name()).collect();
        assert_eq!(names, artifacts.iter().map(|a| a.name.as_str()).collect::<Vec<_>>());

        let shared = ctx.run_directory().join("shared_2024-01-01_10-00-00.csv");
        let other = ctx.run_directory().join("other_2024-01-01_10-00-00.csv");
        assert_eq!(fs::read_to_string(shared).unwrap(), "v\n6\n");
        assert_eq!(fs::read_to_string(other).unwrap(), "v\n7\n");
    }

    #[test]
    fn test_ambiguous_delimiter_rejected_at_save() {
        let dir = TempDir::new().unwrap();
        for delimiter in ['"', '\n', '\r'] {
            let archiver = RunArchiver::builder()
                .delimiter(delimiter)
                .clock(FixedClock(ts("2024-01-01_10-00-00")))
                .build();
            let ctx = archiver.create_run_context(dir.path()).unwrap();

            let err = archiver.save_artifact(&ctx, &sample()).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{delimiter:?}: {err}");
            assert!(!ctx
                .run_directory()
                .join("sample_2024-01-01_10-00-00.csv")
                .exists());
        }
    }

    #[test]
    fn test_custom_naming() {
        let dir = TempDir::new().unwrap();
        let archiver = RunArchiver::builder()
            .output_dir_name("out")
            .run_dir_prefix("run-")
            .extension("tsv")
            .delimiter('\t')
            .clock(FixedClock(ts("2024-01-01_10-00-00")))
            .build();
        let ctx = archiver.create_run_context(dir.path()).unwrap();
        let path = archiver.save_artifact(&ctx, &sample()).unwrap();

        assert_eq!(
            path,
            dir.path()
                .join("out/run-2024-01-01_10-00-00/sample_2024-01-01_10-00-00.tsv")
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\tB\n1\t4\n2\t5\n");
    }

    #[test]
    fn test_archiver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RunArchiver>();
        assert_send_sync::<RunContext>();
    }
}
