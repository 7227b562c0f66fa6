//! Text (terminal) reporter with colors and formatting

use anyhow::Result;

use crate::grade::Grade;
use crate::models::ChecksReport;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: Grade) -> &'static str {
    match grade {
        g if g >= Grade::AMinus => "\x1b[32m", // Green
        g if g >= Grade::BMinus => "\x1b[92m", // Light green
        g if g >= Grade::CMinus => "\x1b[33m", // Yellow
        g if g >= Grade::DMinus => "\x1b[91m", // Light red
        _ => "\x1b[31m",                       // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render report as formatted terminal output
pub fn render(report: &ChecksReport, verbose: bool) -> Result<String> {
    let mut out = String::new();

    let grade_c = grade_color(report.grade);
    out.push_str(&format!(
        "Grade: {grade_c}{BOLD}{}{RESET} ({:.1}%)\n",
        report.grade,
        report.average * 100.0
    ));
    out.push_str(&format!("Files: {}\n", report.files));
    out.push_str(&format!("Issues: {}\n\n", report.issues));

    for check in &report.checks {
        out.push_str(&format!(
            "{}: {:.0}%",
            check.name,
            check.percentage * 100.0
        ));
        if let Some(ref error) = check.error {
            out.push_str(&format!("  {DIM}(error: {error}){RESET}"));
        }
        out.push('\n');

        if verbose && !check.file_summaries.is_empty() {
            for summary in &check.file_summaries {
                out.push_str(&format!("\t{}\n", summary.filename));
                for issue in &summary.issues {
                    out.push_str(&format!("\t\tLine {}: {}\n", issue.line, issue.message));
                }
            }
        }
    }

    if report.did_error {
        out.push_str(&format!(
            "\n{DIM}Some checks did not complete cleanly; the grade reflects partial results.{RESET}\n"
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_render_summary_lines() {
        let out = render(&test_report(), false).expect("render text");
        assert!(out.contains("Grade:"));
        assert!(out.contains("(86.4%)"));
        assert!(out.contains("Files: 12"));
        assert!(out.contains("Issues: 1"));
        assert!(out.contains("fmt: 75%"));
        assert!(out.contains("vet: 100%"));
        assert!(out.contains("partial scan"));
        // Detail lines only appear in verbose mode.
        assert!(!out.contains("pkg/a.go"));
    }

    #[test]
    fn test_render_verbose_detail() {
        let out = render(&test_report(), true).expect("render text");
        assert!(out.contains("\tpkg/a.go\n"));
        assert!(out.contains("\t\tLine 4: line has trailing whitespace\n"));
    }

    #[test]
    fn test_grade_colors_by_band() {
        assert_eq!(grade_color(Grade::APlus), grade_color(Grade::AMinus));
        assert_ne!(grade_color(Grade::A), grade_color(Grade::F));
    }
}
