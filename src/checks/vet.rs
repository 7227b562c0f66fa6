//! Suspicious construct check
//!
//! Flags statements that compile but almost never mean what they say:
//! self-assignments (`x = x`) and comparisons against a boolean literal
//! (`cond == true`). Percentage is the fraction of files with no findings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;

use crate::checks::base::{scan_files, Check, CheckOutcome};
use crate::models::Issue;

static BOOL_COMPARISON: OnceLock<Regex> = OnceLock::new();

fn bool_comparison() -> &'static Regex {
    BOOL_COMPARISON.get_or_init(|| {
        Regex::new(r"(==|!=)\s*(true|false)\b|\b(true|false)\s*(==|!=)").expect("valid regex")
    })
}

pub struct SuspiciousConstructs {
    files: Arc<Vec<PathBuf>>,
    weight: f64,
}

impl SuspiciousConstructs {
    pub const NAME: &'static str = "vet";
    pub const DEFAULT_WEIGHT: f64 = 2.5;

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

impl Check for SuspiciousConstructs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Examines source code for suspicious constructs"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn measure(&self) -> CheckOutcome {
        scan_files(&self.files, scan_file)
    }
}

fn scan_file(_path: &Path, content: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") || trimmed.starts_with('*') {
            continue;
        }
        let line_no = (i + 1) as u32;

        if let Some(name) = self_assignment(trimmed) {
            issues.push(Issue {
                line: line_no,
                message: format!("self-assignment of {name} to {name}"),
            });
        }

        if bool_comparison().is_match(trimmed) {
            issues.push(Issue {
                line: line_no,
                message: "comparison with boolean literal can be simplified".into(),
            });
        }
    }
    issues
}

/// Returns the assigned name when the line is `name = name` for a plain
/// identifier path. Compound operators (`:=`, `+=`, `==`, …) don't count.
fn self_assignment(line: &str) -> Option<&str> {
    let eq = line.find('=')?;
    let lhs = line[..eq].trim_end();
    let rhs = line[eq + 1..].trim_start();
    if rhs.starts_with('=') {
        return None;
    }
    if lhs
        .chars()
        .last()
        .is_some_and(|c| ":+-*/%&|^!<>".contains(c))
    {
        return None;
    }
    let lhs = lhs.trim_start();
    if !lhs.is_empty() && lhs == rhs && is_ident_path(lhs) {
        Some(lhs)
    } else {
        None
    }
}

fn is_ident_path(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
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
    fn test_self_assignment_flagged() {
        let content = "func f() {\n\tx = x\n\ts.count = s.count\n}\n";
        let found = messages(content);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("self-assignment of x"));
        assert!(found[1].contains("self-assignment of s.count"));
    }

    #[test]
    fn test_ordinary_assignments_pass() {
        let content = "func f() {\n\tx = y\n\tx := x2\n\tx += x\n\tif x == x2 {\n\t}\n}\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_bool_literal_comparison_flagged() {
        let content = "func f() {\n\tif ok == true {\n\t}\n\tif false != done {\n\t}\n}\n";
        let found = messages(content);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.contains("boolean literal")));
    }

    #[test]
    fn test_comments_skipped() {
        let content = "// x = x is fine in prose, as is ok == true\nfunc f() {}\n";
        assert!(messages(content).is_empty());
    }
}
