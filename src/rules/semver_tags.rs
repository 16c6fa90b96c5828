//! Generic rules for upstreams that tag releases as plain semantic versions,
//! with or without a leading `v` (`v1.2.3`, `1.2.3`).

use crate::version::{Version, VersionRecord};

use super::{short_tag, unique_versions, ExtractionRules};

pub const NAME: &str = "semver";

/// Accepts strict `MAJOR.MINOR.PATCH` tags without pre-release or build
/// metadata.
pub struct SemverRules;

impl ExtractionRules for SemverRules {
    fn extract(&self, tags: &[String]) -> Vec<VersionRecord> {
        unique_versions(tags.iter().filter_map(|tag| {
            let short = short_tag(tag);
            let version = parse_release(short.strip_prefix('v').unwrap_or(short))?;
            Some(VersionRecord::new(tag.as_str(), version))
        }))
    }
}

/// Parse a strict semantic version that is a final release.
pub(crate) fn parse_release(text: &str) -> Option<Version> {
    let parsed = semver::Version::parse(text).ok()?;
    if !parsed.pre.is_empty() || !parsed.build.is_empty() {
        log::debug!("Skipping pre-release or build-tagged version {}", text);
        return None;
    }
    Some(Version::from(&parsed))
}
