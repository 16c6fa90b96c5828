//! # dockergen
//!
//! Regenerates per-version Dockerfiles and a CI pipeline definition for a set
//! of tracked upstream libraries, driven by the libraries' release tags.
//!
//! ## Quick Example
//!
//! ```
//! use dockergen::rules::Registry;
//! use dockergen::pipeline::select_versions;
//!
//! let registry = Registry::builtin().unwrap();
//! let rules = registry.get("semver").unwrap();
//! let tags: Vec<String> = ["v1.9.0", "v1.10.0", "v1.2.0", "v2.0.0-rc1", "main"]
//!     .iter()
//!     .map(|t| t.to_string())
//!     .collect();
//!
//! let versions: Vec<String> = select_versions(rules, &tags)
//!     .iter()
//!     .map(|r| r.version.to_string())
//!     .collect();
//! assert_eq!(versions, ["1.2.0", "1.9.0", "1.10.0"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Rules (`rules`)**: per-library tag conventions that pick release tags
//!   and normalize them into versions, looked up through a `Registry`.
//! - **Versions (`version`)**: the `Version` type with zero-padded numeric
//!   ordering, stable sorting of records and the `in_range` predicate.
//! - **Rendering (`render`)**: a Handlebars `Renderer` with `in_range`
//!   available as a template helper.
//! - **Materializing (`materialize`)**: idempotent, atomic file writes.
//! - **Pipeline (`pipeline`)**: tags → versions → rendered files → disk for one
//!   library.
//! - **Sync (`sync`, `git`)**: the git-driven loop over all tracked libraries.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//!   dockergen.yaml              optional configuration
//!   .drone.yml.hbs              shared pipeline template
//!   <library>/
//!     Dockerfile.hbs            build file template
//!     upstream/                 clone of the upstream project
//!     .drone.yml                generated
//!     dockerfiles/<version>/Dockerfile   generated
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod materialize;
pub mod pipeline;
pub mod render;
pub mod rules;
pub mod sync;
pub mod version;

#[cfg(test)]
mod version_proptest;
