//! Style lint check
//!
//! Flags exported top-level declarations that carry no doc comment, and
//! underscores in function names. Percentage is the fraction of files with
//! no findings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;

use crate::checks::base::{scan_files, Check, CheckOutcome};
use crate::models::Issue;

static EXPORTED_DECL: OnceLock<Regex> = OnceLock::new();
static UNDERSCORE_FUNC: OnceLock<Regex> = OnceLock::new();

/// Top-level exported declarations: `func Name`, `func (r T) Name`,
/// `type Name`, `var Name`, `const Name`.
fn exported_decl() -> &'static Regex {
    EXPORTED_DECL.get_or_init(|| {
        Regex::new(r"^(?:func(?:\s+\([^)]*\))?|type|var|const)\s+([A-Z]\w*)")
            .expect("valid regex")
    })
}

fn underscore_func() -> &'static Regex {
    UNDERSCORE_FUNC.get_or_init(|| {
        Regex::new(r"^func(?:\s+\([^)]*\))?\s+([A-Za-z0-9]\w*_\w*)").expect("valid regex")
    })
}

pub struct StyleLint {
    files: Arc<Vec<PathBuf>>,
    weight: f64,
}

impl StyleLint {
    pub const NAME: &'static str = "lint";
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new(files: Arc<Vec<PathBuf>>) -> Self {
        Self {
            files,
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Check for StyleLint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Checks exported declarations for documentation and naming style"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn measure(&self) -> CheckOutcome {
        scan_files(&self.files, scan_file)
    }
}

fn scan_file(path: &Path, content: &str) -> Vec<Issue> {
    // Test files document themselves through their test names.
    if path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with("_test.go"))
    {
        return Vec::new();
    }

    let mut issues = Vec::new();
    let mut prev_is_comment = false;
    for (i, line) in content.lines().enumerate() {
        let line_no = (i + 1) as u32;

        if let Some(caps) = exported_decl().captures(line) {
            if !prev_is_comment {
                let name = &caps[1];
                issues.push(Issue {
                    line: line_no,
                    message: format!("exported identifier {name} should have a doc comment"),
                });
            }
        }

        if let Some(caps) = underscore_func().captures(line) {
            issues.push(Issue {
                line: line_no,
                message: format!("don't use underscores in Go names; func {} is not idiomatic", &caps[1]),
            });
        }

        let trimmed = line.trim();
        prev_is_comment =
            trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.ends_with("*/");
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn messages(content: &str) -> Vec<String> {
        scan_file(Path::new("x.go"), content)
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn test_documented_exports_pass() {
        let content = "package a\n\n// Widget is a thing.\ntype Widget struct{}\n\n// Run runs.\nfunc Run() {}\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_undocumented_export_flagged() {
        let content = "package a\n\nfunc Run() {}\n";
        let found = messages(content);
        assert_eq!(found, vec!["exported identifier Run should have a doc comment"]);
    }

    #[test]
    fn test_undocumented_method_flagged() {
        let content = "package a\n\nfunc (w *Widget) Spin() {}\n";
        let found = messages(content);
        assert!(found[0].contains("Spin"));
    }

    #[test]
    fn test_unexported_needs_no_doc() {
        let content = "package a\n\nfunc run() {}\n\ntype widget struct{}\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_underscore_name_flagged() {
        let content = "package a\n\n// do_work does work.\nfunc do_work() {}\n";
        let found = messages(content);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("underscores"));
    }

    #[test]
    fn test_test_files_skipped() {
        let issues = scan_file(Path::new("x_test.go"), "package a\n\nfunc TestRun(t *T) {}\n");
        assert!(issues.is_empty());
    }
}
