//! Check execution engine
//!
//! The CheckEngine runs every registered check to completion in parallel
//! and folds the results into one `ChecksReport`:
//! - one named thread per check, dispatched in list order
//! - a bounded fan-in channel collected with exactly N receives, which is
//!   the implicit join barrier
//! - a failing or panicking check becomes an errored `Score`, never a
//!   process failure, so the receive loop always terminates
//! - scores sorted by weight (then name) so output order is independent of
//!   completion order
//!
//! The check list is handed in explicitly; the engine holds no global
//! registry and is fully exercisable with mock checks.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::checks::base::Check;
use crate::grade::Grade;
use crate::models::{ChecksReport, Score};

/// Progress callback invoked as each score arrives: (check name, completed
/// so far, total).
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine needs at least one check; an empty run has no defined
    /// aggregate.
    #[error("no checks to run")]
    NoChecks,

    /// Weights are the normalization denominator and must be strictly
    /// positive, per check, before anything is dispatched.
    #[error("check \"{name}\" has non-positive weight {weight}")]
    NonPositiveWeight { name: String, weight: f64 },

    /// A check thread went away without reporting. Dispatch guarantees one
    /// score per check, so this indicates a bug in the engine itself.
    #[error("check result channel closed after {received} of {expected} scores")]
    Incomplete { received: usize, expected: usize },
}

/// Runs checks concurrently and aggregates their scores.
pub struct CheckEngine {
    checks: Vec<Arc<dyn Check>>,
    progress_callback: Option<ProgressCallback>,
}

impl CheckEngine {
    /// Create an engine over an explicit, ordered check list.
    pub fn new(checks: Vec<Arc<dyn Check>>) -> Self {
        Self {
            checks,
            progress_callback: None,
        }
    }

    /// Set a progress callback, invoked from the collection loop.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Run every check to completion and build the report.
    ///
    /// `files_analyzed` is carried through to the report unchanged; the
    /// engine itself never touches the filesystem.
    pub fn run(&self, files_analyzed: usize) -> Result<ChecksReport, EngineError> {
        if self.checks.is_empty() {
            return Err(EngineError::NoChecks);
        }
        for check in &self.checks {
            let weight = check.weight();
            if !(weight > 0.0) {
                return Err(EngineError::NonPositiveWeight {
                    name: check.name().to_string(),
                    weight,
                });
            }
        }

        let total = self.checks.len();
        let (tx, rx) = bounded::<Score>(total);
        let mut handles = Vec::with_capacity(total);

        for check in &self.checks {
            let worker_check = Arc::clone(check);
            let worker_tx = tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("check-{}", check.name()))
                .spawn(move || {
                    let score = run_single_check(worker_check.as_ref());
                    // The receiver lives until all N scores are in, so this
                    // send cannot fail in practice; if it somehow does the
                    // collection loop reports Incomplete.
                    let _ = worker_tx.send(score);
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Dispatch itself failed; emit the errored score from
                    // here to keep the exactly-N contract.
                    error!("could not spawn thread for check {}: {}", check.name(), e);
                    let _ = tx.send(errored_score(check.as_ref(), format!("could not start: {e}")));
                }
            }
        }
        drop(tx);

        let mut scores: Vec<Score> = Vec::with_capacity(total);
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut flagged: BTreeSet<String> = BTreeSet::new();
        let mut did_error = false;

        // The fan-in barrier: exactly N receives, in arrival order.
        for received in 0..total {
            let score = rx.recv().map_err(|_| EngineError::Incomplete {
                received,
                expected: total,
            })?;
            debug!("collected score from {} ({:.0}%)", score.name, score.percentage * 100.0);
            if let Some(ref callback) = self.progress_callback {
                callback(&score.name, received + 1, total);
            }

            weighted_sum += score.percentage * score.weight;
            weight_sum += score.weight;
            flagged.extend(score.flagged_files().map(str::to_string));
            did_error |= score.error.is_some();
            scores.push(score);
        }
        for handle in handles {
            let _ = handle.join();
        }

        // weight_sum > 0 was established before dispatch.
        let average = weighted_sum / weight_sum;

        // Presentation order: heaviest first, names as tie-break, so equal
        // runs produce identical reports.
        scores.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(ChecksReport {
            files: files_analyzed,
            checks: scores,
            average,
            issues: flagged.len(),
            grade: Grade::from_percentage(average * 100.0),
            did_error,
        })
    }
}

/// Run one check, containing failures and panics in the score itself.
fn run_single_check(check: &dyn Check) -> Score {
    match catch_unwind(AssertUnwindSafe(|| check.measure())) {
        Ok(outcome) => {
            let error = outcome.failure.map(|failure| {
                warn!("check {} degraded: {:#}", check.name(), failure);
                format!("{failure:#}")
            });
            Score {
                name: check.name().to_string(),
                description: check.description().to_string(),
                weight: check.weight(),
                percentage: outcome.percentage,
                file_summaries: outcome.file_summaries,
                error,
            }
        }
        Err(panic) => {
            let message = if let Some(s) = panic.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            error!("check {} panicked: {}", check.name(), message);
            errored_score(check, format!("panic: {message}"))
        }
    }
}

fn errored_score(check: &dyn Check, error: String) -> Score {
    Score {
        name: check.name().to_string(),
        description: check.description().to_string(),
        weight: check.weight(),
        percentage: 0.0,
        file_summaries: Vec::new(),
        error: Some(error),
    }
}
