//! Convenient imports for runarchive.
//!
//! ```no_run
//! use runarchive::prelude::*;
//!
//! # fn main() -> runarchive::Result<()> {
//! let archiver = RunArchiver::new();
//! let ctx = archiver.create_run_context(".")?;
//! # Ok(())
//! # }
//! ```

// Entry point
pub use crate::{RunArchiver, RunContext};

// Error handling
pub use crate::{Error, Result};

// Data
pub use crate::{Artifact, Record, Value};

// Batches
pub use crate::{ArtifactOutcome, BatchReport};
