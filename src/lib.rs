//! # runarchive
//!
//! Timestamped per-run output archiving for tabular artifacts.
//!
//! Every execution gets one run directory named after the moment it
//! started. Each artifact saved during that execution becomes a CSV file in
//! that directory, stamped with the same timestamp.
//!
//! ## Quick Start
//!
//! ```no_run
//! use runarchive::prelude::*;
//!
//! # fn main() -> runarchive::Result<()> {
//! let archiver = RunArchiver::new();
//! let ctx = archiver.create_run_context("/tmp/app")?;
//!
//! let people = Artifact::with_rows(
//!     "final",
//!     vec![Record::new().with("Name", "John").with("Age", 28)],
//! );
//! let path = archiver.save_artifact(&ctx, &people)?;
//! println!("Saved CSV: {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! ```text
//! <base>/Output/Run_<YYYY-MM-DD_HH-MM-SS>/<name>_<YYYY-MM-DD_HH-MM-SS>.csv
//! ```
//!
//! ## Crates
//!
//! - `runarchive-core`: [`Value`], [`Record`], [`Artifact`], [`RunTimestamp`], [`Error`]
//! - `runarchive-wire`: CSV encoding and reading
//! - `runarchive-durability`: [`RunArchiver`], batches, manifests, run listing

#![warn(missing_docs)]

pub mod prelude;

pub use runarchive_core::{Artifact, Error, Record, Result, RunTimestamp, Value, RUN_TIMESTAMP_FORMAT};
pub use runarchive_durability::{
    ArchiverConfig, ArtifactOutcome, BatchReport, Clock, FailedArtifact, FixedClock, ManifestEntry,
    ManifestFailure, RunArchiver, RunArchiverBuilder, RunContext, RunEntry, RunManifest,
    SavedArtifact, SystemClock, MANIFEST_FILE,
};
pub use runarchive_wire::{decode_csv, encode_artifact, read_csv, CsvTable, DecodeError};
