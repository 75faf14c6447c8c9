//! Run timestamps
//!
//! A [`RunTimestamp`] is captured once per run and appears both in the run
//! directory name and in every artifact file name written during that run.
//! The text form `YYYY-MM-DD_HH-MM-SS` sorts lexicographically in time order.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `strftime` pattern for run timestamps
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Wall-clock time of a run, truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunTimestamp(NaiveDateTime);

impl RunTimestamp {
    /// Wrap a naive date-time, dropping sub-second precision
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        RunTimestamp(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Capture the local wall-clock time of a zoned date-time
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::from_naive(dt.naive_local())
    }

    /// Underlying date-time
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for RunTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RUN_TIMESTAMP_FORMAT))
    }
}

impl FromStr for RunTimestamp {
    type Err = Error;

    /// Parses exactly the text [`Display`](fmt::Display) produces; fields
    /// without zero padding are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = NaiveDateTime::parse_from_str(s, RUN_TIMESTAMP_FORMAT)
            .map(RunTimestamp)
            .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))?;
        if parsed.to_string() != s {
            return Err(Error::InvalidTimestamp(format!(
                "{s:?}: not in canonical YYYY-MM-DD_HH-MM-SS form"
            )));
        }
        Ok(parsed)
    }
}
