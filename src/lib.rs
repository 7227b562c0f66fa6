//! Gradecard - concurrent code quality grader for Go repositories
//!
//! Gradecard discovers the `.go` files under a target directory, runs a
//! fixed set of built-in checks over them in parallel, and folds the
//! per-check cleanliness percentages into a single weighted average and
//! letter grade.
//!
//! High-level modules:
//! - `checks`: the check contract, the built-in checks, and the engine
//!   that fans them out and aggregates their scores.
//! - `cli`: argument parsing and the command entry point (binary uses this).
//! - `config`: optional `gradecard.toml` settings at the target root.
//! - `discovery`: `.go` file enumeration and generated-file quarantine.
//! - `grade`: percentage-to-letter-grade mapping.
//! - `models`: score and report data structures.
//! - `reporters`: text and JSON renderers for the final report.

pub mod checks;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod grade;
pub mod models;
pub mod reporters;
