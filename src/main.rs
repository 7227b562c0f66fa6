//! Gradecard - concurrent code quality grader for Go repositories
//!
//! Runs a fixed set of built-in checks over a Go source tree in parallel
//! and reports a weighted quality percentage and letter grade.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use gradecard::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<ExitCode> {
    let args = cli::Cli::parse();

    // Initialize logging. RUST_LOG overrides the --log-level default.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())))
        .init();

    cli::run(args)
}
