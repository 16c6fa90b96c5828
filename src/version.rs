//! # Version Ordering and Range Checks
//!
//! This module owns the single comparison routine used everywhere versions
//! are ordered: when sorting the records produced by a rule set, and when a
//! template asks whether a version falls inside a range.
//!
//! ## `Version`
//!
//! A `Version` is a non-empty list of numeric components parsed from a
//! dot-separated string such as `1.1.1` or `3.0`. Components are compared
//! numerically from left to right, and the shorter version is treated as if
//! it were padded with zeros. This gives `1.9 < 1.10` (a lexical sort would
//! get this wrong) and `1.0 == 1.0.0`.
//!
//! The original text is kept so that the version can be displayed, and used
//! as a directory name, exactly as the rule set produced it.
//!
//! ## `VersionRecord`
//!
//! Pairs the upstream tag with its normalized `Version`. Records are built
//! fresh by the extraction rules on every run and never mutated afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use log::warn;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A dotted-decimal version with zero-padded, component-wise ordering.
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    components: Vec<u64>,
}

impl Version {
    /// Parse a dotted-decimal version string.
    ///
    /// Every component must be a non-empty run of ASCII digits that fits in a
    /// `u64`. Surrounding whitespace is not accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidVersion {
            input: input.to_string(),
            message: message.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("version is empty"));
        }

        let components = input
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(invalid("empty component"));
                }
                if !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("components must be decimal numbers"));
                }
                part.parse::<u64>()
                    .map_err(|_| invalid("component is out of range"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            text: input.to_string(),
            components,
        })
    }

    /// Build a version directly from numeric components.
    pub fn from_components(components: &[u64]) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::InvalidVersion {
                input: String::new(),
                message: "version has no components".to_string(),
            });
        }
        let text = components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Ok(Self {
            text,
            components: components.to_vec(),
        })
    }

    /// The version exactly as it was parsed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Components with trailing zeros removed; equal versions share this form.
    fn significant(&self) -> &[u64] {
        let len = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |idx| idx + 1);
        &self.components[..len]
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for idx in 0..len {
            let left = self.components.get(idx).copied().unwrap_or(0);
            let right = other.components.get(idx).copied().unwrap_or(0);
            match left.cmp(&right) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl From<&semver::Version> for Version {
    /// Keeps only `major.minor.patch`; callers reject pre-releases first.
    fn from(v: &semver::Version) -> Self {
        Self {
            text: format!("{}.{}.{}", v.major, v.minor, v.patch),
            components: vec![v.major, v.minor, v.patch],
        }
    }
}

/// One upstream release selected for building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    /// The upstream tag, untouched.
    pub tag: String,
    /// The normalized version derived from `tag`.
    pub version: Version,
}

impl VersionRecord {
    pub fn new(tag: impl Into<String>, version: Version) -> Self {
        Self {
            tag: tag.into(),
            version,
        }
    }
}

/// Sort records ascending by version.
///
/// The sort is stable: records with equal versions keep their relative input
/// order, so the same tag list always yields the same sequence.
pub fn sort_records(records: &mut [VersionRecord]) {
    records.sort_by(|a, b| a.version.cmp(&b.version));
}

/// Drop records whose version string was already seen.
///
/// Two records with the same version string would be written to the same
/// directory; the first one (in sorted order) is kept.
pub fn dedup_records(records: Vec<VersionRecord>) -> Vec<VersionRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.version.as_str().to_string());
            if !fresh {
                warn!(
                    "Dropping tag '{}': version {} is already provided by another tag",
                    record.tag, record.version
                );
            }
            fresh
        })
        .collect()
}

/// Check whether `version` lies in the inclusive range `[left, right]`.
///
/// `None` on either side leaves that side unbounded; with both sides `None`
/// every version is in range.
pub fn in_range(version: &Version, left: Option<&Version>, right: Option<&Version>) -> bool {
    let above_left = left.map_or(true, |l| l <= version);
    let below_right = right.map_or(true, |r| version <= r);
    above_left && below_right
}
