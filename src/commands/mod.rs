//! # CLI Command Implementations
//!
//! Each subcommand lives in its own file with an `Args` struct derived with
//! `clap` and an `execute` function that calls into the `dockergen` library.
//! Helpers shared by several commands are defined here.

pub mod generate;
pub mod sync;
pub mod versions;

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use dockergen::config::{self, Config};
use dockergen::git;
use dockergen::materialize::WriteOutcome;
use dockergen::pipeline::LibraryReport;
use dockergen::sync::upstream_path;

use crate::cli::GlobalArgs;

/// Load the configuration selected by the global options.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    Ok(config::load(global.config.as_deref(), &global.root)?)
}

/// Tags from a file when given, otherwise from the library's upstream clone.
pub(crate) fn read_tags(global: &GlobalArgs, library: &str, tags_file: Option<&Path>) -> Result<Vec<String>> {
    match tags_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read tags file {}", path.display()))?;
            Ok(git::parse_tag_list(&content))
        }
        None => Ok(git::list_tags(&upstream_path(&global.root, library))?),
    }
}

/// One summary line for a generated library.
pub(crate) fn print_report(report: &LibraryReport) {
    println!(
        "{} {}: {} versions, {} created, {} updated, {} unchanged",
        style("✓").green(),
        style(&report.library).bold(),
        report.versions.len(),
        report.count(WriteOutcome::Created),
        report.count(WriteOutcome::Updated),
        report.count(WriteOutcome::Unchanged),
    );
}

pub(crate) fn print_failure(library: &str, error: &dockergen::error::Error) {
    println!("{} {}: {}", style("✗").red(), style(library).bold(), error);
}
