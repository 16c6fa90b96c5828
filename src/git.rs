//! Thin wrappers around the `git` binary used by the sync driver.
//!
//! Everything goes through the system `git`, which picks up SSH keys,
//! credential helpers and `~/.gitconfig` without any extra configuration.

use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

fn git(repo: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            repo: repo.to_path_buf(),
            stderr: e.to_string(),
        })
}

/// Run a git command and return its stdout, failing on a non-zero exit.
fn run(repo: &Path, args: &[&str]) -> Result<String> {
    let output = git(repo, args)?;
    if !output.status.success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            repo: repo.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// List every tag in a local repository.
pub fn list_tags(repo: &Path) -> Result<Vec<String>> {
    let stdout = run(repo, &["tag", "--list"])?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn checkout(repo: &Path, branch: &str) -> Result<()> {
    run(repo, &["checkout", branch]).map(|_| ())
}

pub fn pull_rebase(repo: &Path) -> Result<()> {
    run(repo, &["pull", "--rebase"]).map(|_| ())
}

/// Check out `branch` and bring it up to date with its remote.
pub fn update_branch(repo: &Path, branch: &str) -> Result<()> {
    checkout(repo, branch)?;
    pull_rebase(repo)
}

pub fn add(repo: &Path, pathspec: &str) -> Result<()> {
    run(repo, &["add", pathspec]).map(|_| ())
}

/// Whether the index holds changes that a commit would record.
pub fn has_staged_changes(repo: &Path) -> Result<bool> {
    let output = git(repo, &["diff", "--cached", "--quiet"])?;
    match output.status.code() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(Error::GitCommand {
            command: "diff --cached --quiet".to_string(),
            repo: repo.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
    }
}

/// Commit the index. Returns `false` without committing when it is clean.
pub fn commit(repo: &Path, message: &str) -> Result<bool> {
    if !has_staged_changes(repo)? {
        return Ok(false);
    }
    run(repo, &["commit", "--message", message])?;
    Ok(true)
}

pub fn push(repo: &Path) -> Result<()> {
    run(repo, &["push"]).map(|_| ())
}

/// Parse a tags file: one tag per line, blank lines and `#` comments ignored.
pub fn parse_tag_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
