//! Misspelling check
//!
//! Finds commonly misspelled English words anywhere in the source, matched
//! on word boundaries and case-insensitively, and suggests the correction.
//! Percentage is the fraction of files with no findings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;

use crate::checks::base::{scan_files, Check, CheckOutcome};
use crate::models::Issue;

/// Misspelling → correction. Kept small and high-confidence; every entry
/// here is a word with essentially no legitimate identifier use.
const CORRECTIONS: &[(&str, &str)] = &[
    ("accross", "across"),
    ("agressive", "aggressive"),
    ("arbitary", "arbitrary"),
    ("calender", "calendar"),
    ("commited", "committed"),
    ("comitted", "committed"),
    ("definately", "definitely"),
    ("dependancy", "dependency"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("explicitely", "explicitly"),
    ("immediatly", "immediately"),
    ("independant", "independent"),
    ("langauge", "language"),
    ("lenght", "length"),
    ("neccessary", "necessary"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("paramter", "parameter"),
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("succesful", "successful"),
    ("sucessful", "successful"),
    ("teh", "the"),
    ("transfered", "transferred"),
    ("unkown", "unknown"),
    ("untill", "until"),
    ("usefull", "useful"),
];

static MISSPELLING: OnceLock<Regex> = OnceLock::new();
static LOOKUP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn misspelling() -> &'static Regex {
    MISSPELLING.get_or_init(|| {
        let words: Vec<&str> = CORRECTIONS.iter().map(|(wrong, _)| *wrong).collect();
        Regex::new(&format!(r"(?i)\b({})\b", words.join("|"))).expect("valid regex")
    })
}

fn lookup() -> &'static HashMap<&'static str, &'static str> {
    LOOKUP.get_or_init(|| CORRECTIONS.iter().copied().collect())
}

pub struct Misspell {
    files: Arc<Vec<PathBuf>>,
    weight: f64,
}

impl Misspell {
    pub const NAME: &'static str = "misspell";
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

impl Check for Misspell {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Finds commonly misspelled English words"
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
        for caps in misspelling().captures_iter(line) {
            let found = &caps[1];
            let correction = lookup()
                .get(found.to_ascii_lowercase().as_str())
                .copied()
                .unwrap_or("?");
            issues.push(Issue {
                line: (i + 1) as u32,
                message: format!("\"{found}\" is a misspelling of \"{correction}\""),
            });
        }
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
    fn test_clean_prose_passes() {
        let content = "// Receives the length of the environment.\npackage a\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_misspellings_found_case_insensitively() {
        let content = "// Recieve teh data\n// SEPERATE path\n";
        let found = messages(content);
        assert_eq!(found.len(), 3);
        assert!(found[0].contains("\"Recieve\" is a misspelling of \"receive\""));
        assert!(found[1].contains("misspelling of \"the\""));
        assert!(found[2].contains("misspelling of \"separate\""));
    }

    #[test]
    fn test_word_boundaries_respected() {
        // "lenght" only as a whole word; "slenght..." must not match.
        let content = "var slenghty = 1\n";
        assert!(messages(content).is_empty());
    }
}
