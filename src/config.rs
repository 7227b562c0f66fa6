//! Project configuration
//!
//! An optional `gradecard.toml` at the target root supplies run defaults.
//! CLI flags always win over file values. Absent file means all defaults.
//!
//! ```toml
//! threshold = 85.0
//! max_complexity = 12
//! skip_checks = ["misspell"]
//!
//! [weights]
//! fmt = 5.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the config file looked up in the target root.
pub const CONFIG_FILE: &str = "gradecard.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Failure threshold on the 0-100 scale; below it the process exits 1.
    pub threshold: Option<f64>,
    /// Per-function complexity limit for the cyclo check.
    pub max_complexity: Option<u32>,
    /// Check names to leave out of the run.
    #[serde(default)]
    pub skip_checks: Vec<String>,
    /// Per-check weight overrides. Values must be strictly positive; the
    /// engine rejects a non-positive weight before dispatching anything.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl ProjectConfig {
    /// Load `gradecard.toml` from `root` if present.
    ///
    /// A missing file is not an error; a malformed one is fatal — silently
    /// ignoring configuration the user wrote would misgrade the tree.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("could not parse {}", path.display()))?;
        debug!("loaded {}", path.display());
        Ok(config)
    }

    /// Weight override for a check, if configured.
    pub fn weight_for(&self, check: &str) -> Option<f64> {
        self.weights.get(check).copied()
    }

    /// Whether a check is configured off.
    pub fn skips(&self, check: &str) -> bool {
        self.skip_checks.iter().any(|s| s == check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ProjectConfig::load(dir.path()).expect("load");
        assert!(config.threshold.is_none());
        assert!(config.skip_checks.is_empty());
        assert!(config.weights.is_empty());
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
threshold = 85.0
max_complexity = 12
skip_checks = ["misspell"]

[weights]
fmt = 5.0
"#,
        )
        .expect("write config");

        let config = ProjectConfig::load(dir.path()).expect("load");
        assert_eq!(config.threshold, Some(85.0));
        assert_eq!(config.max_complexity, Some(12));
        assert!(config.skips("misspell"));
        assert!(!config.skips("fmt"));
        assert_eq!(config.weight_for("fmt"), Some(5.0));
        assert_eq!(config.weight_for("vet"), None);
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "threshold = \"not a number\"")
            .expect("write config");
        assert!(ProjectConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "thresold = 80.0")
            .expect("write config");
        assert!(ProjectConfig::load(dir.path()).is_err());
    }
}
