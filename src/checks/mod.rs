//! Quality checks and the engine that runs them
//!
//! `base` defines the check contract, `engine` the concurrent fan-out and
//! score aggregation. The remaining modules are the built-in checks. The
//! check set is assembled explicitly by `default_checks` and handed to the
//! engine; there is no global registry.

pub mod base;
pub mod engine;

mod cyclo;
mod fmt;
mod ineffassign;
mod lint;
mod misspell;
mod vet;

pub use base::{Check, CheckOutcome};
pub use cyclo::{Complexity, DEFAULT_COMPLEXITY_LIMIT};
pub use engine::{CheckEngine, EngineError, ProgressCallback};
pub use fmt::Formatting;
pub use ineffassign::IneffectualAssign;
pub use lint::StyleLint;
pub use misspell::Misspell;
pub use vet::SuspiciousConstructs;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::config::ProjectConfig;

/// Names of every built-in check, in registration order.
pub const BUILTIN_CHECKS: &[&str] = &[
    Formatting::NAME,
    SuspiciousConstructs::NAME,
    StyleLint::NAME,
    Complexity::NAME,
    Misspell::NAME,
    IneffectualAssign::NAME,
];

/// Assemble the built-in check list over a shared file set, applying the
/// project config's skips, weight overrides, and complexity limit.
pub fn default_checks(files: Arc<Vec<PathBuf>>, config: &ProjectConfig) -> Vec<Arc<dyn Check>> {
    for name in config
        .skip_checks
        .iter()
        .chain(config.weights.keys())
    {
        if !BUILTIN_CHECKS.contains(&name.as_str()) {
            warn!("config references unknown check \"{name}\"");
        }
    }

    let weight = |name: &str, default: f64| config.weight_for(name).unwrap_or(default);
    let limit = config.max_complexity.unwrap_or(DEFAULT_COMPLEXITY_LIMIT);

    let checks: Vec<Arc<dyn Check>> = vec![
        Arc::new(
            Formatting::new(Arc::clone(&files))
                .with_weight(weight(Formatting::NAME, Formatting::DEFAULT_WEIGHT)),
        ),
        Arc::new(
            SuspiciousConstructs::new(Arc::clone(&files)).with_weight(weight(
                SuspiciousConstructs::NAME,
                SuspiciousConstructs::DEFAULT_WEIGHT,
            )),
        ),
        Arc::new(
            StyleLint::new(Arc::clone(&files))
                .with_weight(weight(StyleLint::NAME, StyleLint::DEFAULT_WEIGHT)),
        ),
        Arc::new(
            Complexity::new(Arc::clone(&files))
                .with_weight(weight(Complexity::NAME, Complexity::DEFAULT_WEIGHT))
                .with_limit(limit),
        ),
        Arc::new(
            Misspell::new(Arc::clone(&files))
                .with_weight(weight(Misspell::NAME, Misspell::DEFAULT_WEIGHT)),
        ),
        Arc::new(
            IneffectualAssign::new(Arc::clone(&files)).with_weight(weight(
                IneffectualAssign::NAME,
                IneffectualAssign::DEFAULT_WEIGHT,
            )),
        ),
    ];

    checks
        .into_iter()
        .filter(|check| !config.skips(check.name()))
        .collect()
}
