//! Core types for runarchive
//!
//! This crate defines the data model shared by every other crate:
//! - [`Value`]: a single cell value
//! - [`Record`] and [`Artifact`]: ordered rows and the named table they form
//! - [`RunTimestamp`]: the per-run timestamp used in directory and file names
//! - [`Error`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod timestamp;
pub mod value;

pub use error::{Error, Result};
pub use record::{Artifact, Record};
pub use timestamp::{RunTimestamp, RUN_TIMESTAMP_FORMAT};
pub use value::Value;
