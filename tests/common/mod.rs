//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_templates("botan").with_tags(tags::BOTAN);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::Command;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{dockergen_cmd, tags, templates};
    pub use super::TestFixture;
}

/// Tag lists as they appear in the upstream repositories.
#[allow(dead_code)]
pub mod tags {
    pub const BOTAN: &str = "\
1.10.17
1.11.34
2.0.0
2.17.3
2.9.0
3.0.0-alpha1
";

    pub const MBEDTLS: &str = "\
mbedtls-2.16.0
v2.16.0
mbedtls-2.28.1
v3.4.0
polarssl-1.3.9
";

    pub const OPENSSL: &str = "\
OpenSSL_1_0_2
OpenSSL_1_0_2a
OpenSSL_1_0_2u
OpenSSL_1_1_1-pre9
OpenSSL_1_1_1w
openssl-3.0.0
openssl-3.0.0-alpha17
openssl-3.1.4
";
}

/// Template snippets used by the fixtures.
#[allow(dead_code)]
pub mod templates {
    pub const BUILD: &str = "\
FROM debian:stable-slim
LABEL upstream={{upstream_url}}
RUN git clone --branch {{tag}} --depth 1 {{upstream_url}} /src
# {{library_name}} {{version}}
";

    pub const PIPELINE: &str = "\
kind: pipeline
name: {{library_name}}
steps:
{{#each versions}}
  - name: {{version}}
    image: plugins/docker
    settings:
      dockerfile: dockerfiles/{{version}}/Dockerfile
{{/each}}
";
}

/// Get a Command for the dockergen binary.
#[allow(dead_code)]
pub fn dockergen_cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("dockergen").unwrap()
}

/// A temporary automation root with templates and tag files.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Write the shared pipeline template and a build template for `library`.
    pub fn with_templates(self, library: &str) -> Self {
        self.with_build_template(library, templates::BUILD)
            .with_pipeline_template(templates::PIPELINE)
    }

    pub fn with_build_template(self, library: &str, content: &str) -> Self {
        self.temp
            .child(library)
            .child("Dockerfile.hbs")
            .write_str(content)
            .unwrap();
        self
    }

    pub fn with_pipeline_template(self, content: &str) -> Self {
        self.temp.child(".drone.yml.hbs").write_str(content).unwrap();
        self
    }

    /// Write `tags.txt` at the root.
    pub fn with_tags(self, content: &str) -> Self {
        self.temp.child("tags.txt").write_str(content).unwrap();
        self
    }

    pub fn with_config(self, content: &str) -> Self {
        self.temp.child("dockergen.yaml").write_str(content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn tags_path(&self) -> PathBuf {
        self.temp.path().join("tags.txt")
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.temp.path().join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.temp.path().join(relative).exists()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
