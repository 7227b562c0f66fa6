//! CLI definition and the command entry point

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::checks::{self, CheckEngine};
use crate::config::ProjectConfig;
use crate::discovery::{self, Quarantine};
use crate::reporters::{self, OutputFormat};

/// Default failure threshold when neither flag nor config supplies one.
const DEFAULT_THRESHOLD: f64 = 90.0;

/// Parse and validate a threshold percentage (0-100)
fn parse_threshold(s: &str) -> Result<f64, String> {
    let t: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid percentage", s))?;
    if !(0.0..=100.0).contains(&t) {
        Err("threshold must be between 0 and 100".to_string())
    } else {
        Ok(t)
    }
}

/// Gradecard - concurrent code quality grader for Go repositories
///
/// Runs every built-in check over the target tree in parallel and folds
/// the results into a weighted percentage and letter grade.
#[derive(Parser, Debug)]
#[command(name = "gradecard")]
#[command(
    version,
    about = "Grade a Go repository's code quality with concurrent checks",
    after_help = "\
Examples:
  gradecard .                        Grade the current directory
  gradecard path/to/repo -v          Show per-file issue detail
  gradecard . --format json         JSON report for scripting
  gradecard . -t 80                  Pass CI at 80% instead of 90%
  gradecard . --skip-check misspell  Leave one check out

A gradecard.toml in the target root can set threshold, skip_checks,
max_complexity, and per-check [weights]; flags win over the file.

Exit status is 0 when the weighted percentage meets the threshold,
1 otherwise."
)]
pub struct Cli {
    /// Path to the Go repository to grade
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Failure threshold percentage (0-100); below it the exit code is 1
    #[arg(long, short = 't', value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Show per-file, per-issue detail in text output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Output format: text, json
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Skip a check by name (repeatable)
    #[arg(long)]
    pub skip_check: Vec<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

/// Run the whole grading flow and map the report to an exit code.
pub fn run(args: Cli) -> Result<ExitCode> {
    let format = OutputFormat::from_str(&args.format)?;

    let mut config = ProjectConfig::load(&args.path)?;
    config.skip_checks.extend(args.skip_check.iter().cloned());
    let threshold = args
        .threshold
        .or(config.threshold)
        .unwrap_or(DEFAULT_THRESHOLD);

    let source = discovery::go_files(&args.path)
        .with_context(|| format!("could not check {}", args.path.display()))?;
    info!(
        "discovered {} files ({} skipped as generated)",
        source.files.len(),
        source.skipped.len()
    );

    // Generated files stay out of sight for the whole concurrent phase;
    // the guard restores them once scores are in, even on error.
    let quarantine = Quarantine::hold(&source.skipped);

    let files = Arc::new(source.files);
    let checks = checks::default_checks(Arc::clone(&files), &config);

    let mut engine = CheckEngine::new(checks);
    let bar = progress_bar(format, engine.check_count());
    if let Some(ref bar) = bar {
        let bar = bar.clone();
        engine = engine.with_progress_callback(Box::new(move |name, _done, _total| {
            bar.set_message(name.to_string());
            bar.inc(1);
        }));
    }

    let report = engine.run(files.len());
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    drop(quarantine);
    let report = report?;

    print!("{}", reporters::render(&report, format, args.verbose)?);

    if report.average * 100.0 >= threshold {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// A progress bar on stderr for interactive text runs; JSON output stays
/// clean for piping.
fn progress_bar(format: OutputFormat, checks: usize) -> Option<ProgressBar> {
    if format != OutputFormat::Text {
        return None;
    }
    let bar = ProgressBar::new(checks as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:24} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );
    Some(bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gradecard"]).expect("parse");
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.threshold, None);
        assert!(!cli.verbose);
        assert_eq!(cli.format, "text");
        assert!(cli.skip_check.is_empty());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_threshold_validation() {
        let cli = Cli::try_parse_from(["gradecard", "-t", "75"]).expect("parse");
        assert_eq!(cli.threshold, Some(75.0));

        assert!(Cli::try_parse_from(["gradecard", "-t", "101"]).is_err());
        assert!(Cli::try_parse_from(["gradecard", "-t", "-3"]).is_err());
        assert!(Cli::try_parse_from(["gradecard", "-t", "ninety"]).is_err());
    }

    #[test]
    fn test_format_values() {
        assert!(Cli::try_parse_from(["gradecard", "--format", "json"]).is_ok());
        assert!(Cli::try_parse_from(["gradecard", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_repeatable_skip_check() {
        let cli = Cli::try_parse_from([
            "gradecard",
            "--skip-check",
            "misspell",
            "--skip-check",
            "cyclo",
        ])
        .expect("parse");
        assert_eq!(cli.skip_check, vec!["misspell", "cyclo"]);
    }
}
