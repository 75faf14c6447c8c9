//! Batch save outcomes
//!
//! Artifacts in a batch are independent: one failure never prevents the
//! remaining saves. A [`BatchReport`] holds one [`ArtifactOutcome`] per input
//! artifact, in input order.

use runarchive_core::Error;
use std::path::PathBuf;

/// A successfully written artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    /// Artifact name
    pub name: String,
    /// Absolute path written
    pub path: PathBuf,
    /// Number of data rows
    pub rows: usize,
    /// Header columns in file order
    pub columns: Vec<String>,
    /// xxh3 checksum of the bytes written, lowercase hex
    pub checksum: String,
}

/// An artifact that could not be written
#[derive(Debug)]
pub struct FailedArtifact {
    /// Artifact name
    pub name: String,
    /// Why the save failed
    pub error: Error,
}

/// Result of saving one artifact in a batch
#[derive(Debug)]
pub enum ArtifactOutcome {
    /// Written to disk
    Saved(SavedArtifact),
    /// Not written
    Failed(FailedArtifact),
}

impl ArtifactOutcome {
    /// Artifact name
    pub fn name(&self) -> &str {
        match self {
            ArtifactOutcome::Saved(s) => &s.name,
            ArtifactOutcome::Failed(f) => &f.name,
        }
    }

    /// Path written, if the save succeeded
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ArtifactOutcome::Saved(s) => Some(&s.path),
            ArtifactOutcome::Failed(_) => None,
        }
    }

    /// Error, if the save failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            ArtifactOutcome::Saved(_) => None,
            ArtifactOutcome::Failed(f) => Some(&f.error),
        }
    }

    /// Check if the save succeeded
    pub fn is_saved(&self) -> bool {
        matches!(self, ArtifactOutcome::Saved(_))
    }
}

/// Per-artifact outcomes of one batch
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<ArtifactOutcome>,
}

impl BatchReport {
    pub(crate) fn new(outcomes: Vec<ArtifactOutcome>) -> Self {
        BatchReport { outcomes }
    }

    /// All outcomes in input order
    pub fn outcomes(&self) -> &[ArtifactOutcome] {
        &self.outcomes
    }

    /// Successful saves in input order
    pub fn saved(&self) -> impl Iterator<Item = &SavedArtifact> {
        self.outcomes.iter().filter_map(|o| match o {
            ArtifactOutcome::Saved(s) => Some(s),
            ArtifactOutcome::Failed(_) => None,
        })
    }

    /// Failed saves in input order
    pub fn failures(&self) -> impl Iterator<Item = &FailedArtifact> {
        self.outcomes.iter().filter_map(|o| match o {
            ArtifactOutcome::Saved(_) => None,
            ArtifactOutcome::Failed(f) => Some(f),
        })
    }

    /// Number of successful saves
    pub fn saved_count(&self) -> usize {
        self.saved().count()
    }

    /// Number of failed saves
    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// True when every artifact was written
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ArtifactOutcome::is_saved)
    }

    /// Number of artifacts in the batch
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True for an empty batch
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(name: &str) -> ArtifactOutcome {
        ArtifactOutcome::Saved(SavedArtifact {
            name: name.to_string(),
            path: PathBuf::from(format!("/run/{name}.csv")),
            rows: 1,
            columns: vec!["A".to_string()],
            checksum: "00".to_string(),
        })
    }

    fn failed(name: &str) -> ArtifactOutcome {
        ArtifactOutcome::Failed(FailedArtifact {
            name: name.to_string(),
            error: Error::InvalidInput("bad".to_string()),
        })
    }

    #[test]
    fn test_empty_report_is_complete() {
        let report = BatchReport::default();
        assert!(report.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_mixed_report() {
        let report = BatchReport::new(vec![saved("a"), failed("b"), saved("c")]);
        assert_eq!(report.len(), 3);
        assert_eq!(report.saved_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_complete());

        let names: Vec<_> = report.outcomes().iter().map(ArtifactOutcome::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(report.failures().next().unwrap().name, "b");
        assert!(report.outcomes()[1].path().is_none());
        assert!(report.outcomes()[1].error().is_some());
    }
}
