//! # Configuration
//!
//! This module defines the `dockergen.yaml` schema and its loader.
//!
//! ```yaml
//! branch: master
//! libraries:
//!   - name: mbedtls
//!     url: https://github.com/ARMmbed/mbedtls.git
//!     settings:
//!       timeout: 60
//!   - name: wolfssl
//!     url: https://github.com/wolfSSL/wolfssl.git
//!     rules: semver
//! ```
//!
//! When the default configuration file is absent the built-in library list
//! from `defaults` is used, so a fresh checkout of the mirror repository works
//! without any configuration.
//!
//! `settings` is an open mapping passed verbatim to the aggregate pipeline
//! template. It is stored in a `BTreeMap` so that templates iterating over it
//! render in a stable order.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults::{BUILTIN_LIBRARIES, DEFAULT_BRANCH};
use crate::error::{Error, Result};

/// Free-form settings consumed by the aggregate template.
pub type Settings = BTreeMap<String, serde_json::Value>;

/// One upstream project whose releases are mirrored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackedLibrary {
    /// Unique name; also the directory holding the library's files.
    pub name: String,
    /// Upstream repository URL.
    pub url: String,
    /// Rule set identifier, when it differs from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(default)]
    pub settings: Settings,
}

impl TrackedLibrary {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            rules: None,
            settings: Settings::new(),
        }
    }

    /// The extraction rule set to use for this library.
    pub fn rules_id(&self) -> &str {
        self.rules.as_deref().unwrap_or(&self.name)
    }

    /// Rule defaults overlaid with the configured settings.
    pub fn effective_settings(&self, defaults: Settings) -> Settings {
        let mut merged = defaults;
        merged.extend(self.settings.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Top-level `dockergen.yaml` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_branch")]
    pub branch: String,
    pub libraries: Vec<TrackedLibrary>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            libraries: BUILTIN_LIBRARIES
                .iter()
                .map(|(name, url)| TrackedLibrary::new(*name, *url))
                .collect(),
        }
    }
}

impl Config {
    /// Look up a tracked library by name.
    pub fn library(&self, name: &str) -> Result<&TrackedLibrary> {
        self.libraries
            .iter()
            .find(|lib| lib.name == name)
            .ok_or_else(|| Error::UnknownLibrary {
                name: name.to_string(),
                known: self
                    .libraries
                    .iter()
                    .map(|lib| lib.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for lib in &self.libraries {
            if lib.name.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: "Library name must not be empty".to_string(),
                    hint: None,
                });
            }
            if lib.name.contains(['/', '\\']) || lib.name == "." || lib.name == ".." {
                return Err(Error::ConfigParse {
                    message: format!("Library name '{}' is not a plain directory name", lib.name),
                    hint: Some("The name is used as a directory under the root".to_string()),
                });
            }
            if !seen.insert(lib.name.as_str()) {
                return Err(Error::ConfigParse {
                    message: format!("Duplicate library '{}'", lib.name),
                    hint: Some("Each library name must appear once".to_string()),
                });
            }
        }
        Ok(())
    }
}

/// Parse a configuration document.
pub fn parse(yaml_content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("Expected a mapping with a `libraries:` list".to_string()),
    })?;
    config.validate()?;
    Ok(config)
}

/// Parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load the configuration for a run.
///
/// An explicitly requested file must exist. Without one, `<root>/dockergen.yaml`
/// is used when present and the built-in defaults otherwise.
pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::ConfigParse {
                message: format!("Configuration file not found: {}", path.display()),
                hint: None,
            });
        }
        return from_file(path);
    }

    let default_path = root.join(crate::defaults::DEFAULT_CONFIG_FILENAME);
    if default_path.exists() {
        from_file(&default_path)
    } else {
        log::debug!(
            "No {} in {}, using built-in libraries",
            crate::defaults::DEFAULT_CONFIG_FILENAME,
            root.display()
        );
        Ok(Config::default())
    }
}
