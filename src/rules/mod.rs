//! # Tag Extraction Rules
//!
//! Every tracked library names its releases differently. OpenSSL tags look
//! like `OpenSSL_1_1_1k`, Mbed TLS uses both `mbedtls-2.16.0` and `v2.16.0`
//! for the same release, Botan uses bare `2.17.3`. An `ExtractionRules`
//! implementation knows one such convention: it picks the tags that are real
//! releases and maps each one to a normalized `Version`.
//!
//! ## Contract
//!
//! - Tags outside the convention (branches, release candidates, unrelated
//!   markers) are dropped, never reported as errors.
//! - The same release reachable through two tag spellings is returned once.
//! - Extraction is a pure function of the tag list.
//!
//! ## Registry
//!
//! `Registry` maps a rule identifier to its strategy. It is built once at
//! startup with `Registry::builtin()`; a library picks its rules through
//! `TrackedLibrary::rules_id()`, which defaults to the library name.

pub mod botan;
pub mod mbedtls;
pub mod openssl;
pub mod semver_tags;

use std::collections::{BTreeMap, HashSet};

use crate::config::{Settings, TrackedLibrary};
use crate::error::{Error, Result};
use crate::version::VersionRecord;

/// A library-specific tag naming convention.
pub trait ExtractionRules {
    /// Select release tags and normalize them into version records.
    ///
    /// The returned records are in no particular order.
    fn extract(&self, tags: &[String]) -> Vec<VersionRecord>;

    /// Default settings handed to the aggregate pipeline template.
    fn settings(&self) -> Settings {
        Settings::new()
    }
}

/// Lookup table from rule identifier to extraction strategy.
#[derive(Default)]
pub struct Registry {
    rules: BTreeMap<String, Box<dyn ExtractionRules>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every rule set shipped in this crate.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(botan::NAME, Box::new(botan::BotanRules::new()?));
        registry.register(mbedtls::NAME, Box::new(mbedtls::MbedTlsRules::new()?));
        registry.register(openssl::NAME, Box::new(openssl::OpenSslRules::new()?));
        registry.register(semver_tags::NAME, Box::new(semver_tags::SemverRules));
        Ok(registry)
    }

    /// Add or replace the rule set stored under `id`.
    pub fn register(&mut self, id: impl Into<String>, rules: Box<dyn ExtractionRules>) {
        self.rules.insert(id.into(), rules);
    }

    pub fn get(&self, id: &str) -> Option<&dyn ExtractionRules> {
        self.rules.get(id).map(|rules| rules.as_ref())
    }

    /// Find the rule set a library is configured to use.
    pub fn resolve(&self, library: &TrackedLibrary) -> Result<&dyn ExtractionRules> {
        self.get(library.rules_id())
            .ok_or_else(|| Error::UnknownRules {
                library: library.name.clone(),
                rules: library.rules_id().to_string(),
            })
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

/// Strip the `refs/tags/` prefix some tag sources include.
pub(crate) fn short_tag(tag: &str) -> &str {
    tag.strip_prefix("refs/tags/").unwrap_or(tag)
}

/// Keep the first record for each version string, preserving input order.
pub(crate) fn unique_versions(records: impl IntoIterator<Item = VersionRecord>) -> Vec<VersionRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.version.as_str().to_string()))
        .collect()
}
