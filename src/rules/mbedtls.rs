//! Mbed TLS tags releases as `mbedtls-X.Y.Z`, and since 2.x also as
//! `vX.Y.Z`; both spellings name the same release. PolarSSL-era tags and
//! candidates (`-rc0`, `p1` hotfix markers) are not built.

use regex::Regex;

use crate::error::Result;
use crate::version::{Version, VersionRecord};

use super::{short_tag, unique_versions, ExtractionRules};

pub const NAME: &str = "mbedtls";

pub struct MbedTlsRules {
    pattern: Regex,
}

impl MbedTlsRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"^(?:mbedtls-|v)(\d+\.\d+\.\d+)$")?,
        })
    }
}

impl ExtractionRules for MbedTlsRules {
    fn extract(&self, tags: &[String]) -> Vec<VersionRecord> {
        unique_versions(tags.iter().filter_map(|tag| {
            let caps = self.pattern.captures(short_tag(tag))?;
            let version = Version::parse(&caps[1]).ok()?;
            Some(VersionRecord::new(tag.as_str(), version))
        }))
    }
}
