//! Time sources for run timestamps

use chrono::Local;
use runarchive_core::RunTimestamp;

/// Source of the timestamp captured when a run context is created.
pub trait Clock: Send + Sync {
    /// Current time, truncated to whole seconds
    fn now(&self) -> RunTimestamp;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> RunTimestamp {
        RunTimestamp::from_datetime(&Local::now())
    }
}

/// Always returns the same timestamp
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub RunTimestamp);

impl Clock for FixedClock {
    fn now(&self) -> RunTimestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let ts: RunTimestamp = "2024-01-01_10-00-00".parse().unwrap();
        let clock = FixedClock(ts);
        assert_eq!(clock.now(), ts);
        assert_eq!(clock.now(), ts);
    }

    #[test]
    fn test_system_clock_formats() {
        let text = SystemClock.now().to_string();
        assert_eq!(text.len(), "YYYY-MM-DD_HH-MM-SS".len());
        assert!(text.parse::<RunTimestamp>().is_ok());
    }
}
