//! # Error Handling
//!
//! This module defines the centralized error type for `dockergen`. It uses the
//! `thiserror` library to build one `Error` enum covering every failure the
//! library can report, each variant carrying enough context (library name,
//! template name, path) to diagnose a failed run without rerunning it.
//!
//! ## Scope of each failure
//!
//! - **Tag extraction**: a malformed tag is never an error, it is dropped by
//!   the rule set. Only an unresolvable rule set (`UnknownRules`) fails a
//!   library.
//! - **Templates**: `TemplateRead` and `Template` abort the current library;
//!   other libraries keep going.
//! - **Writes**: `Write` aborts the current library at the failing version;
//!   files written for earlier versions stay on disk.
//! - **Git**: `GitCommand` is raised by the sync driver only.
//!
//! `Result<T>` is the crate-wide alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dockergen operations
#[derive(Error, Debug)]
pub enum Error {
    /// The `dockergen.yaml` configuration could not be parsed or is invalid.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// No extraction rule set is registered under the requested identifier.
    #[error("No extraction rules named '{rules}' for library '{library}'")]
    UnknownRules { library: String, rules: String },

    /// A library name was requested that the configuration does not track.
    #[error("Library '{name}' is not tracked (known: {known})")]
    UnknownLibrary { name: String, known: String },

    /// A string could not be parsed as a dotted-decimal version.
    #[error("Invalid version '{input}': {message}")]
    InvalidVersion { input: String, message: String },

    /// A template file could not be read from disk.
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template failed to compile or render.
    ///
    /// Covers syntax errors, references to undefined variables and helper
    /// failures such as an unparseable `in_range` bound.
    #[error("Template processing error in {template} for {library}: {message}")]
    Template {
        library: String,
        template: String,
        message: String,
    },

    /// A generated file could not be written.
    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    /// A git command exited unsuccessfully.
    #[error("Git command failed in {}: git {command} - {stderr}", repo.display())]
    GitCommand {
        command: String,
        repo: PathBuf,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
