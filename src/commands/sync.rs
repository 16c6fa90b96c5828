//! # Sync Command Implementation
//!
//! Runs the full update for every tracked library (or the ones named on the
//! command line): update the upstream clones, read their tags, regenerate the
//! Dockerfiles and pipelines, and with `--commit` commit and push the result.
//!
//! The command fails when any library failed, after all of them have been
//! attempted.

use anyhow::Result;
use clap::Args;

use dockergen::rules::Registry;
use dockergen::sync::{sync, SyncOptions};

use super::{load_config, print_failure, print_report};
use crate::cli::GlobalArgs;

/// Update upstreams and regenerate files for every library
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Libraries to sync (defaults to all configured libraries)
    #[arg(value_name = "LIBRARY")]
    pub libraries: Vec<String>,

    /// Commit and push generated changes
    #[arg(long)]
    pub commit: bool,

    /// Use the upstream clones as they are instead of pulling them first
    #[arg(long)]
    pub no_fetch: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let selected = if args.libraries.is_empty() {
        config.libraries.iter().collect::<Vec<_>>()
    } else {
        args.libraries
            .iter()
            .map(|name| config.library(name))
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    let registry = Registry::builtin()?;
    let options = SyncOptions {
        root: global.root.clone(),
        commit: args.commit,
        fetch: !args.no_fetch,
    };

    let summary = sync(&config, &selected, &registry, &options)?;
    for (library, result) in &summary.results {
        match result {
            Ok(report) => print_report(report),
            Err(e) => print_failure(library, e),
        }
    }

    let failures = summary.failures();
    if failures > 0 {
        anyhow::bail!("{} of {} libraries failed", failures, summary.results.len());
    }
    Ok(())
}
