//! Core data models for Gradecard
//!
//! These structures carry one check's result (`Score`) and the combined
//! report for a whole run (`ChecksReport`). A report is built once per
//! invocation and is immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// One defect found by a check, located by line within its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub line: u32,
    pub message: String,
}

/// All issues one check found in a single file, in ascending line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub filename: String,
    pub issues: Vec<Issue>,
}

impl FileSummary {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            issues: Vec::new(),
        }
    }
}

/// The output of one check run: identity, cleanliness fraction in [0, 1],
/// per-file issue detail, and the failure text if the check could not
/// complete. `error: None` means the check ran cleanly; a `Some` error does
/// not invalidate the percentage — a degraded check still contributes
/// whatever signal it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub percentage: f64,
    pub file_summaries: Vec<FileSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Score {
    /// Distinct filenames this score flagged.
    pub fn flagged_files(&self) -> impl Iterator<Item = &str> {
        self.file_summaries.iter().map(|fs| fs.filename.as_str())
    }
}

/// Combined result of a full run across all checks.
///
/// `checks` is sorted by weight descending (ties broken by name) so output
/// is reproducible regardless of which check finished first. `issues` counts
/// distinct files flagged by at least one check, not the sum of per-check
/// counts: a file flagged by three checks counts once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksReport {
    /// Number of files analyzed.
    pub files: usize,
    pub checks: Vec<Score>,
    /// Weighted average of check percentages, in [0, 1].
    pub average: f64,
    /// Count of distinct files with at least one issue.
    pub issues: usize,
    pub grade: Grade,
    /// True iff at least one check reported an error.
    pub did_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flagged_files() {
        let score = Score {
            name: "fmt".into(),
            description: "formatting".into(),
            weight: 3.0,
            percentage: 0.5,
            file_summaries: vec![
                FileSummary::new("a.go"),
                FileSummary::new("b.go"),
            ],
            error: None,
        };
        let files: Vec<&str> = score.flagged_files().collect();
        assert_eq!(files, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_score_error_omitted_from_json_when_none() {
        let score = Score {
            name: "fmt".into(),
            description: "formatting".into(),
            weight: 3.0,
            percentage: 1.0,
            file_summaries: vec![],
            error: None,
        };
        let json = serde_json::to_string(&score).expect("serialize score");
        assert!(!json.contains("error"));

        let failed = Score {
            error: Some("tool unavailable".into()),
            ..score
        };
        let json = serde_json::to_string(&failed).expect("serialize score");
        assert!(json.contains("tool unavailable"));
    }
}
