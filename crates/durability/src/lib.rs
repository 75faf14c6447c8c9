//! Durability layer for runarchive
//!
//! This crate puts artifacts on disk:
//! - [`RunArchiver`]: creates run contexts and saves artifacts
//! - [`RunContext`]: one execution's timestamp and run directory
//! - [`BatchReport`]: per-artifact outcomes of a batch save
//! - [`RunManifest`]: `MANIFEST.json` summary of a run
//! - run discovery via [`RunArchiver::list_runs`]
//!
//! ## Layout
//!
//! ```text
//! <base>/Output/Run_<YYYY-MM-DD_HH-MM-SS>/<name>_<YYYY-MM-DD_HH-MM-SS>.csv
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archiver;
pub mod batch;
pub mod clock;
pub mod config;
pub mod context;
pub mod manifest;
pub mod runs;

pub use archiver::{RunArchiver, RunArchiverBuilder};
pub use batch::{ArtifactOutcome, BatchReport, FailedArtifact, SavedArtifact};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ArchiverConfig;
pub use context::RunContext;
pub use manifest::{
    xxh3_hex, ManifestEntry, ManifestFailure, RunManifest, MANIFEST_FILE, MANIFEST_FORMAT_VERSION,
};
pub use runs::{list_runs_in, RunEntry};
