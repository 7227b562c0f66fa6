//! Cyclomatic complexity check
//!
//! Computes a complexity score per top-level function: 1 plus the number of
//! branch points (`if`, `for`, `case`, `&&`, `||`) in the body. Functions
//! above the limit are flagged. Unlike the file-based checks, percentage
//! here is the fraction of *functions* within the limit.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

use anyhow::anyhow;
use rayon::prelude::*;
use regex::Regex;

use crate::checks::base::{clean_fraction, summaries_from, Check, CheckOutcome};
use crate::models::Issue;

pub const DEFAULT_COMPLEXITY_LIMIT: u32 = 10;

static FUNC_DECL: OnceLock<Regex> = OnceLock::new();
static BRANCH_KEYWORD: OnceLock<Regex> = OnceLock::new();

fn func_decl() -> &'static Regex {
    FUNC_DECL.get_or_init(|| {
        Regex::new(r"^func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)").expect("valid regex")
    })
}

fn branch_keyword() -> &'static Regex {
    BRANCH_KEYWORD.get_or_init(|| Regex::new(r"\b(?:if|for|case)\b").expect("valid regex"))
}

/// One parsed function: name, declaration line, complexity score.
struct FunctionComplexity {
    name: String,
    line: u32,
    complexity: u32,
}

pub struct Complexity {
    files: Arc<Vec<PathBuf>>,
    weight: f64,
    limit: u32,
}

impl Complexity {
    pub const NAME: &'static str = "cyclo";
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new(files: Arc<Vec<PathBuf>>) -> Self {
        Self {
            files,
            weight: Self::DEFAULT_WEIGHT,
            limit: DEFAULT_COMPLEXITY_LIMIT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Check for Complexity {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Measures the cyclomatic complexity of each function"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn measure(&self) -> CheckOutcome {
        let results: Vec<(String, Result<Vec<FunctionComplexity>, std::io::Error>)> = self
            .files
            .par_iter()
            .map(|path| {
                let name = path.display().to_string();
                match std::fs::read_to_string(path) {
                    Ok(content) => (name, Ok(parse_functions(&content))),
                    Err(e) => (name, Err(e)),
                }
            })
            .collect();

        let mut per_file = BTreeMap::new();
        let mut functions = 0usize;
        let mut flagged = 0usize;
        let mut unreadable: Vec<String> = Vec::new();
        for (filename, result) in results {
            match result {
                Ok(parsed) => {
                    functions += parsed.len();
                    let issues: Vec<Issue> = parsed
                        .into_iter()
                        .filter(|f| f.complexity > self.limit)
                        .map(|f| Issue {
                            line: f.line,
                            message: format!(
                                "function {} has cyclomatic complexity {} (limit {})",
                                f.name, f.complexity, self.limit
                            ),
                        })
                        .collect();
                    flagged += issues.len();
                    if !issues.is_empty() {
                        per_file.insert(filename, issues);
                    }
                }
                Err(e) => unreadable.push(format!("{filename}: {e}")),
            }
        }

        let percentage = clean_fraction(functions, flagged);
        let summaries = summaries_from(per_file);
        if unreadable.is_empty() {
            CheckOutcome::of(percentage, summaries)
        } else {
            CheckOutcome::degraded(
                percentage,
                summaries,
                anyhow!(
                    "could not read {} file(s): {}",
                    unreadable.len(),
                    unreadable.join("; ")
                ),
            )
        }
    }
}

/// Walk the file line by line, tracking brace depth to find top-level
/// function bodies and counting branch points inside them.
fn parse_functions(content: &str) -> Vec<FunctionComplexity> {
    let mut functions = Vec::new();
    let mut current: Option<FunctionComplexity> = None;
    let mut depth = 0i32;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }

        if depth == 0 {
            if let Some(caps) = func_decl().captures(trimmed) {
                current = Some(FunctionComplexity {
                    name: caps[1].to_string(),
                    line: (i + 1) as u32,
                    complexity: 1,
                });
            }
        } else if let Some(ref mut f) = current {
            f.complexity += branch_keyword().find_iter(trimmed).count() as u32;
            f.complexity += trimmed.matches("&&").count() as u32;
            f.complexity += trimmed.matches("||").count() as u32;
        }

        depth += line.matches('{').count() as i32;
        depth -= line.matches('}').count() as i32;
        if depth <= 0 {
            depth = 0;
            if let Some(f) = current.take() {
                functions.push(f);
            }
        }
    }
    functions
}
