//! JSON reporter
//!
//! Outputs the full ChecksReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use anyhow::Result;

use crate::models::ChecksReport;

/// Render report as JSON
pub fn render(report: &ChecksReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["grade"], "B");
        assert_eq!(parsed["files"], 12);
        assert_eq!(parsed["did_error"], true);
        assert_eq!(parsed["checks"].as_array().expect("checks array").len(), 2);
    }

    #[test]
    fn test_json_error_field_only_when_present() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["checks"][0].get("error").is_none());
        assert_eq!(parsed["checks"][1]["error"], "partial scan");
    }
}
