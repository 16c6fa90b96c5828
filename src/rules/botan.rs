//! Botan tags each release as a bare `MAJOR.MINOR.PATCH`.
//!
//! Before 2.0 Botan used odd minor numbers for development series
//! (`1.9.x`, `1.11.x`); those are not shipped releases and are skipped.

use regex::Regex;

use crate::error::Result;
use crate::version::{Version, VersionRecord};

use super::{short_tag, unique_versions, ExtractionRules};

pub const NAME: &str = "botan";

pub struct BotanRules {
    pattern: Regex,
}

impl BotanRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"^(\d+)\.(\d+)\.(\d+)$")?,
        })
    }

    fn classify(&self, tag: &str) -> Option<Version> {
        let caps = self.pattern.captures(short_tag(tag))?;
        let version = Version::parse(&format!("{}.{}.{}", &caps[1], &caps[2], &caps[3])).ok()?;
        let (major, minor) = (version.components()[0], version.components()[1]);
        if major < 2 && minor % 2 == 1 {
            log::debug!("Skipping Botan development release {}", tag);
            return None;
        }
        Some(version)
    }
}

impl ExtractionRules for BotanRules {
    fn extract(&self, tags: &[String]) -> Vec<VersionRecord> {
        unique_versions(tags.iter().filter_map(|tag| {
            self.classify(tag)
                .map(|version| VersionRecord::new(tag.as_str(), version))
        }))
    }
}
