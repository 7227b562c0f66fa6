//! Ineffectual assignment check
//!
//! Flags a variable assignment whose value is overwritten by a later
//! assignment with no read in between, within the same function body.
//! Only plain single-variable assignments are tracked; anything the
//! line-level scan cannot see (closures, goto) simply clears on read, so
//! the check errs toward silence. Percentage is the fraction of files with
//! no findings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;

use crate::checks::base::{scan_files, Check, CheckOutcome};
use crate::models::Issue;

static IDENT: OnceLock<Regex> = OnceLock::new();

fn ident() -> &'static Regex {
    IDENT.get_or_init(|| Regex::new(r"[A-Za-z_]\w*").expect("valid regex"))
}

pub struct IneffectualAssign {
    files: Arc<Vec<PathBuf>>,
    weight: f64,
}

impl IneffectualAssign {
    pub const NAME: &'static str = "ineffassign";
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

impl Check for IneffectualAssign {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Detects assignments whose values are never used"
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
    let mut depth = 0i32;
    // Variables assigned but not yet read, by line of the assignment.
    let mut pending: HashMap<String, u32> = HashMap::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        let line_no = (i + 1) as u32;

        if depth > 0 {
            let assignment = parse_assignment(trimmed);
            // Everything on the read side of the line clears the pending
            // state for the identifiers it mentions.
            let read_part = match assignment {
                Some((_, rhs)) => rhs,
                None => trimmed,
            };
            for m in ident().find_iter(read_part) {
                pending.remove(m.as_str());
            }

            if let Some((name, _)) = assignment {
                if let Some(previous) = pending.insert(name.to_string(), line_no) {
                    issues.push(Issue {
                        line: previous,
                        message: format!("ineffectual assignment to {name}"),
                    });
                }
            }
        }

        depth += line.matches('{').count() as i32;
        depth -= line.matches('}').count() as i32;
        if depth <= 0 {
            depth = 0;
            pending.clear();
        }
    }

    issues.sort_by_key(|issue| issue.line);
    issues
}

/// Split a plain `name = expr` or `name := expr` into (name, expr).
/// Compound operators, comparisons, and multi-variable assignments are
/// not tracked.
fn parse_assignment(line: &str) -> Option<(&str, &str)> {
    let eq = line.find('=')?;
    let (lhs, rest) = line.split_at(eq);
    let rhs = rest[1..].trim_start();
    if rest[1..].starts_with('=') {
        return None;
    }
    let lhs = lhs.trim_end();
    // `:=` declares; any other trailing symbol is a compound operator or
    // comparison and is not tracked.
    let lhs = lhs.strip_suffix(':').unwrap_or(lhs);
    if lhs
        .chars()
        .last()
        .is_some_and(|c| "+-*/%&|^!<>".contains(c))
    {
        return None;
    }
    let name = lhs.trim_end();
    let is_simple_ident = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_simple_ident && name != "_" {
        Some((name, rhs))
    } else {
        None
    }
}
