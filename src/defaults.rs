//! Default values and fixed file names used across dockergen.
//!
//! The on-disk layout is a convention shared by the generator and the CI that
//! consumes its output, so these names are constants rather than settings.

use std::path::{Path, PathBuf};

/// Configuration file looked up in the root directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "dockergen.yaml";

/// Branch checked out before pulling when syncing.
pub const DEFAULT_BRANCH: &str = "master";

/// Per-version build file template, relative to the library directory.
pub const BUILD_TEMPLATE_FILENAME: &str = "Dockerfile.hbs";

/// Aggregate pipeline template, shared by all libraries, relative to the root.
pub const PIPELINE_TEMPLATE_FILENAME: &str = ".drone.yml.hbs";

/// Directory under each library holding one subdirectory per version.
pub const GENERATED_DIRNAME: &str = "dockerfiles";

/// Name of the generated build file inside each version directory.
pub const BUILD_FILENAME: &str = "Dockerfile";

/// Name of the generated pipeline file at the library root.
pub const PIPELINE_FILENAME: &str = ".drone.yml";

/// Upstream clone inside each library directory.
pub const UPSTREAM_DIRNAME: &str = "upstream";

/// Libraries tracked when no configuration file is present.
pub const BUILTIN_LIBRARIES: &[(&str, &str)] = &[
    ("botan", "https://github.com/randombit/botan.git"),
    ("mbedtls", "https://github.com/ARMmbed/mbedtls.git"),
    ("openssl", "https://github.com/openssl/openssl.git"),
];

/// `<root>/<library>/dockerfiles/<version>/Dockerfile`
pub fn build_file_path(root: &Path, library: &str, version: &str) -> PathBuf {
    root.join(library)
        .join(GENERATED_DIRNAME)
        .join(version)
        .join(BUILD_FILENAME)
}

/// `<root>/<library>/.drone.yml`
pub fn pipeline_file_path(root: &Path, library: &str) -> PathBuf {
    root.join(library).join(PIPELINE_FILENAME)
}
