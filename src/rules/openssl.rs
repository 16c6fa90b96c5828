//! OpenSSL changed its tag scheme with 3.0: older releases are tagged
//! `OpenSSL_1_1_1k`, newer ones `openssl-3.0.7`. Letter releases become a
//! fourth numeric component (`a` = 1), so `1.1.1k` is stored as `1.1.1.11`
//! and still sorts after `1.1.1` and before `1.1.2`.
//!
//! Alpha, beta and pre-release tags, FIPS module tags and engine branches
//! never match the patterns below.

use regex::Regex;
use serde_json::json;

use crate::config::Settings;
use crate::error::Result;
use crate::version::{Version, VersionRecord};

use super::{short_tag, unique_versions, ExtractionRules};

pub const NAME: &str = "openssl";

/// Minutes a single OpenSSL build may take in CI.
const BUILD_TIMEOUT_MINUTES: u64 = 120;

pub struct OpenSslRules {
    legacy: Regex,
    modern: Regex,
}

impl OpenSslRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            legacy: Regex::new(r"^OpenSSL_(\d+)_(\d+)_(\d+)([a-z]?)$")?,
            modern: Regex::new(r"^openssl-(\d+)\.(\d+)\.(\d+)$")?,
        })
    }

    fn classify(&self, tag: &str) -> Option<Version> {
        let tag = short_tag(tag);
        let caps = self.legacy.captures(tag).or_else(|| self.modern.captures(tag))?;

        let mut components = Vec::with_capacity(4);
        for idx in 1..=3 {
            components.push(caps[idx].parse::<u64>().ok()?);
        }
        if let Some(letter) = caps.get(4).and_then(|m| m.as_str().bytes().next()) {
            components.push(u64::from(letter - b'a' + 1));
        }
        Version::from_components(&components).ok()
    }
}

impl ExtractionRules for OpenSslRules {
    fn extract(&self, tags: &[String]) -> Vec<VersionRecord> {
        unique_versions(tags.iter().filter_map(|tag| {
            self.classify(tag)
                .map(|version| VersionRecord::new(tag.as_str(), version))
        }))
    }

    fn settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.insert("timeout".to_string(), json!(BUILD_TIMEOUT_MINUTES));
        settings
    }
}
