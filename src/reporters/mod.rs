//! Output reporters for check results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::models::ChecksReport;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a checks report in the given format. `verbose` expands the text
/// format with per-file, per-issue detail; JSON always carries everything.
pub fn render(report: &ChecksReport, format: OutputFormat, verbose: bool) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, verbose),
        OutputFormat::Json => json::render(report),
    }
}
