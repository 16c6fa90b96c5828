//! # Sync Driver
//!
//! Wraps the generation pipeline with the git steps needed to run it
//! unattended in CI:
//!
//! 1.  With `commit`, the root repository is switched to the configured
//!     branch and pulled.
//! 2.  For every library, in configuration order:
//!     - with `commit`, the library repository is switched and pulled;
//!     - with `fetch`, the upstream clone is switched and pulled;
//!     - tags are read from the upstream clone and files generated;
//!     - with `commit`, the library repository is committed and pushed and
//!       the library is staged in the root repository.
//! 3.  With `commit`, the root repository is committed and pushed.
//!
//! A failing library is logged and reported but does not stop the others.
//! Without `commit` nothing is ever pulled into the library repositories,
//! since a developer running locally is likely to have uncommitted edits.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::{Config, TrackedLibrary};
use crate::defaults::UPSTREAM_DIRNAME;
use crate::error::Result;
use crate::git;
use crate::materialize::WriteOutcome;
use crate::pipeline::{Generator, LibraryReport};
use crate::rules::Registry;

/// Switches for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub root: PathBuf,
    /// Pull before and commit/push after generating.
    pub commit: bool,
    /// Update the upstream clones before reading their tags.
    pub fetch: bool,
}

/// Per-library outcome of a sync run, in processing order.
#[derive(Debug, Default)]
pub struct SyncSummary {
    pub results: Vec<(String, Result<LibraryReport>)>,
}

impl SyncSummary {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }
}

/// Message used for automated commits.
pub fn commit_message() -> String {
    format!("Automatic update {}", chrono::Local::now().date_naive())
}

/// Directory holding a library's upstream clone.
pub fn upstream_path(root: &Path, library: &str) -> PathBuf {
    root.join(library).join(UPSTREAM_DIRNAME)
}

/// Run the sync for `libraries`, which must belong to `config`.
///
/// Only failures in the root repository abort the run; per-library failures
/// are collected in the summary.
pub fn sync(
    config: &Config,
    libraries: &[&TrackedLibrary],
    registry: &Registry,
    options: &SyncOptions,
) -> Result<SyncSummary> {
    let root = options.root.as_path();
    if options.commit {
        info!("Pulling most recent version of {}", root.display());
        git::update_branch(root, &config.branch)?;
    }

    let mut generator = Generator::new(root, registry);
    let mut summary = SyncSummary::default();

    for library in libraries {
        let result = sync_library(&mut generator, library, &config.branch, options)
            .and_then(|report| {
                if options.commit {
                    stage_in_root(root, &library.name, report)
                } else {
                    Ok(report)
                }
            });
        match &result {
            Ok(report) => {
                info!(
                    "{}: {} versions, {} files changed",
                    library.name,
                    report.versions.len(),
                    report.files.len() - report.count(WriteOutcome::Unchanged)
                );
            }
            Err(e) => error!("{}: {}", library.name, e),
        }
        summary.results.push((library.name.clone(), result));
    }

    if options.commit {
        if git::commit(root, &commit_message())? {
            git::push(root)?;
            info!("Updated submodule references");
        } else {
            info!("No submodule references updated");
        }
    }

    Ok(summary)
}

/// Stage a library's new state in the root repository.
fn stage_in_root(root: &Path, library: &str, report: LibraryReport) -> Result<LibraryReport> {
    git::add(root, library)?;
    Ok(report)
}

fn sync_library(
    generator: &mut Generator<'_>,
    library: &TrackedLibrary,
    branch: &str,
    options: &SyncOptions,
) -> Result<LibraryReport> {
    let repo = options.root.join(&library.name);
    let upstream = upstream_path(&options.root, &library.name);

    if options.commit {
        info!("{}: pull most recent version", library.name);
        git::update_branch(&repo, branch)?;
    }

    if options.fetch {
        info!("{}: update upstream", library.name);
        git::update_branch(&upstream, branch)?;
    }

    info!("{}: get tag information from upstream", library.name);
    let tags = git::list_tags(&upstream)?;
    let report = generator.generate(library, &tags)?;

    if options.commit {
        info!("{}: attempt to commit changes", library.name);
        git::add(&repo, ".")?;
        if git::commit(&repo, &commit_message())? {
            git::push(&repo)?;
            info!("{}: committed changes", library.name);
        } else {
            info!("{}: no changes committed", library.name);
        }
    }

    Ok(report)
}
