//! Base check trait and types
//!
//! This module defines the core abstractions for quality checks:
//! - `Check` trait that all checks must implement
//! - `CheckOutcome` for capturing one check's measurement
//! - Shared helpers for file scanning and percentage arithmetic

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use rayon::prelude::*;

use crate::models::{FileSummary, Issue};

/// What one check run produced: a cleanliness fraction in [0, 1], the files
/// it flagged, and an optional non-fatal failure.
///
/// A failure does not invalidate the percentage. A check that could only
/// scan part of its input reports the fraction it measured alongside the
/// failure, and the engine folds that partial signal into the aggregate
/// rather than dropping the check.
#[derive(Debug)]
pub struct CheckOutcome {
    pub percentage: f64,
    pub file_summaries: Vec<FileSummary>,
    pub failure: Option<anyhow::Error>,
}

impl CheckOutcome {
    /// A fully clean result: 100%, nothing flagged.
    pub fn clean() -> Self {
        Self {
            percentage: 1.0,
            file_summaries: Vec::new(),
            failure: None,
        }
    }

    /// A completed measurement.
    pub fn of(percentage: f64, file_summaries: Vec<FileSummary>) -> Self {
        Self {
            percentage,
            file_summaries,
            failure: None,
        }
    }

    /// A check that produced nothing before failing.
    pub fn failed(failure: anyhow::Error) -> Self {
        Self {
            percentage: 0.0,
            file_summaries: Vec::new(),
            failure: Some(failure),
        }
    }

    /// A partial measurement alongside a failure.
    pub fn degraded(
        percentage: f64,
        file_summaries: Vec<FileSummary>,
        failure: anyhow::Error,
    ) -> Self {
        Self {
            percentage,
            file_summaries,
            failure: Some(failure),
        }
    }
}

/// Trait for all quality checks.
///
/// A check measures one aspect of a fixed source set and reports what
/// fraction of it is clean. What "fraction" means is check-specific (most
/// built-ins count clean files; the complexity check counts clean
/// functions) and documented on each implementation.
pub trait Check: Send + Sync {
    /// Unique identifier, stable across runs (e.g. "fmt").
    fn name(&self) -> &'static str;

    /// Human-readable description of what this check measures.
    fn description(&self) -> &'static str;

    /// Relative influence on the aggregate percentage. Must be strictly
    /// positive; the engine refuses to run otherwise.
    fn weight(&self) -> f64;

    /// Run the measurement over the check's file set.
    fn measure(&self) -> CheckOutcome;
}

/// Fraction of `total` units that are not among the `flagged` ones.
/// An empty input is vacuously clean.
pub fn clean_fraction(total: usize, flagged: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        total.saturating_sub(flagged) as f64 / total as f64
    }
}

/// Fold per-file issue lists into deterministic summaries: filenames
/// ascending, issues in ascending line order within each file.
pub fn summaries_from(per_file: BTreeMap<String, Vec<Issue>>) -> Vec<FileSummary> {
    per_file
        .into_iter()
        .filter(|(_, issues)| !issues.is_empty())
        .map(|(filename, mut issues)| {
            issues.sort_by_key(|i| i.line);
            FileSummary { filename, issues }
        })
        .collect()
}

/// Scan every file in parallel and fold the per-file issues into an
/// outcome whose percentage is the fraction of files with no issues.
///
/// Unreadable files are excluded from the fraction and surfaced as a
/// non-fatal failure on the outcome, so the check still contributes the
/// signal it measured.
pub fn scan_files<F>(files: &[PathBuf], scan: F) -> CheckOutcome
where
    F: Fn(&Path, &str) -> Vec<Issue> + Sync,
{
    let results: Vec<(String, Result<Vec<Issue>, std::io::Error>)> = files
        .par_iter()
        .map(|path| {
            let name = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(content) => (name, Ok(scan(path, &content))),
                Err(e) => (name, Err(e)),
            }
        })
        .collect();

    let mut per_file = BTreeMap::new();
    let mut scanned = 0usize;
    let mut flagged = 0usize;
    let mut unreadable: Vec<String> = Vec::new();
    for (name, result) in results {
        match result {
            Ok(issues) => {
                scanned += 1;
                if !issues.is_empty() {
                    flagged += 1;
                    per_file.insert(name, issues);
                }
            }
            Err(e) => unreadable.push(format!("{name}: {e}")),
        }
    }

    let percentage = clean_fraction(scanned, flagged);
    let summaries = summaries_from(per_file);
    if unreadable.is_empty() {
        CheckOutcome::of(percentage, summaries)
    } else {
        CheckOutcome::degraded(
            percentage,
            summaries,
            anyhow!("could not read {} file(s): {}", unreadable.len(), unreadable.join("; ")),
        )
    }
}
