//! Formatting hygiene check
//!
//! Flags mechanical formatting defects a formatter would fix: CRLF line
//! endings, trailing whitespace, space-based indentation (Go sources indent
//! with tabs), and a missing final newline. Percentage is the fraction of
//! files with no formatting issues.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::checks::base::{scan_files, Check, CheckOutcome};
use crate::models::Issue;

pub struct Formatting {
    files: Arc<Vec<PathBuf>>,
    weight: f64,
}

impl Formatting {
    pub const NAME: &'static str = "fmt";
    pub const DEFAULT_WEIGHT: f64 = 3.0;

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

impl Check for Formatting {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Checks files for mechanical formatting defects"
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
    let mut line_count = 0u32;

    for (i, raw) in content.lines().enumerate() {
        let line_no = (i + 1) as u32;
        line_count = line_no;

        let line = match raw.strip_suffix('\r') {
            Some(stripped) => {
                issues.push(Issue {
                    line: line_no,
                    message: "line uses CRLF line ending".into(),
                });
                stripped
            }
            None => raw,
        };

        if line.len() != line.trim_end().len() {
            issues.push(Issue {
                line: line_no,
                message: "line has trailing whitespace".into(),
            });
        }

        // Go indents with tabs; leading spaces outside comment
        // continuations mean the file was not run through a formatter.
        if line.starts_with(' ') {
            let trimmed = line.trim_start();
            if !trimmed.starts_with('*') && !trimmed.starts_with("//") && !trimmed.is_empty() {
                issues.push(Issue {
                    line: line_no,
                    message: "line is indented with spaces instead of tabs".into(),
                });
            }
        }
    }

    if !content.is_empty() && !content.ends_with('\n') {
        issues.push(Issue {
            line: line_count,
            message: "file does not end with a newline".into(),
        });
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
    fn test_clean_file_has_no_issues() {
        let content = "package main\n\nfunc main() {\n\tprintln(\"ok\")\n}\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let content = "package main \r\nfunc main() {}\t\n";
        let found = messages(content);
        assert!(found.iter().any(|m| m.contains("CRLF")));
        assert!(found.iter().any(|m| m.contains("trailing whitespace")));
    }

    #[test]
    fn test_space_indentation_flagged() {
        let content = "package main\n\nfunc main() {\n    println(\"ok\")\n}\n";
        let found = messages(content);
        assert_eq!(found, vec!["line is indented with spaces instead of tabs"]);
    }

    #[test]
    fn test_block_comment_continuation_allowed() {
        let content = "/*\n * licensed\n */\npackage main\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_missing_final_newline() {
        let content = "package main\n\nfunc main() {}";
        let found = scan_file(Path::new("x.go"), content);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
        assert!(found[0].message.contains("end with a newline"));
    }
}
