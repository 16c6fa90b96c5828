//! # Generation Pipeline
//!
//! Turns one library's raw tag list into files on disk:
//!
//! 1.  **Extract**: the library's `ExtractionRules` select release tags and
//!     normalize their versions.
//! 2.  **Order**: records are sorted by version (stable) and any record whose
//!     version string repeats an earlier one is dropped.
//! 3.  **Load templates**: `<root>/<library>/Dockerfile.hbs` and the shared
//!     `<root>/.drone.yml.hbs` are read and compiled.
//! 4.  **Render**: one build file per version plus the aggregate pipeline
//!     definition. Everything is rendered before anything is written, so a
//!     template error leaves the library's existing files untouched.
//! 5.  **Write**: files are materialized in version order. A write failure
//!     stops the library; files already written stay as they are.
//!
//! The `Generator` owns the run's single `Renderer` and borrows the rule
//! registry; it keeps no state between libraries.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::TrackedLibrary;
use crate::defaults::{
    build_file_path, pipeline_file_path, BUILD_TEMPLATE_FILENAME, PIPELINE_TEMPLATE_FILENAME,
};
use crate::error::{Error, Result};
use crate::materialize::{GeneratedFile, WriteOutcome};
use crate::render::{BuildContext, PipelineContext, Renderer};
use crate::rules::{ExtractionRules, Registry};
use crate::version::{dedup_records, sort_records, VersionRecord};

/// Extract, sort and deduplicate the versions to build from raw tags.
pub fn select_versions(rules: &dyn ExtractionRules, tags: &[String]) -> Vec<VersionRecord> {
    let mut records = rules.extract(tags);
    debug!("{} of {} tags are releases", records.len(), tags.len());
    sort_records(&mut records);
    dedup_records(records)
}

/// The two template sources for one library.
#[derive(Debug, Clone)]
pub struct Templates {
    pub build: String,
    pub pipeline: String,
}

impl Templates {
    /// Read the library's build template and the shared pipeline template.
    pub fn load(root: &Path, library: &str) -> Result<Self> {
        Ok(Self {
            build: read_template(&root.join(library).join(BUILD_TEMPLATE_FILENAME))?,
            pipeline: read_template(&root.join(PIPELINE_TEMPLATE_FILENAME))?,
        })
    }
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::TemplateRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Everything a library run would write, fully rendered.
#[derive(Debug, Clone)]
pub struct Plan {
    pub library: String,
    pub versions: Vec<VersionRecord>,
    /// Per-version build files in version order, then the pipeline file.
    pub files: Vec<GeneratedFile>,
}

/// Result of generating one library.
#[derive(Debug, Clone)]
pub struct LibraryReport {
    pub library: String,
    pub versions: Vec<VersionRecord>,
    pub files: Vec<(PathBuf, WriteOutcome)>,
}

impl LibraryReport {
    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.files.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Runs the pipeline for libraries below one root directory.
pub struct Generator<'a> {
    root: PathBuf,
    registry: &'a Registry,
    renderer: Renderer,
}

impl<'a> Generator<'a> {
    pub fn new(root: impl Into<PathBuf>, registry: &'a Registry) -> Self {
        Self {
            root: root.into(),
            registry,
            renderer: Renderer::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extract and order the versions a library would build.
    pub fn versions(&self, library: &TrackedLibrary, tags: &[String]) -> Result<Vec<VersionRecord>> {
        let rules = self.registry.resolve(library)?;
        Ok(select_versions(rules, tags))
    }

    /// Render every file for a library without touching the filesystem
    /// beyond reading its templates.
    pub fn plan(&mut self, library: &TrackedLibrary, tags: &[String]) -> Result<Plan> {
        let templates = Templates::load(&self.root, &library.name)?;
        self.plan_with(library, tags, &templates)
    }

    /// Like `plan`, with the template sources supplied by the caller.
    pub fn plan_with(
        &mut self,
        library: &TrackedLibrary,
        tags: &[String],
        templates: &Templates,
    ) -> Result<Plan> {
        let registry = self.registry;
        let rules = registry.resolve(library)?;
        let versions = select_versions(rules, tags);
        let settings = library.effective_settings(rules.settings());

        let build_name = format!("{}/{}", library.name, BUILD_TEMPLATE_FILENAME);
        self.renderer.for_library(&library.name);
        self.renderer.register(&build_name, &templates.build)?;
        self.renderer
            .register(PIPELINE_TEMPLATE_FILENAME, &templates.pipeline)?;

        let mut files = Vec::with_capacity(versions.len() + 1);
        for record in &versions {
            let context = BuildContext {
                library_name: &library.name,
                upstream_url: &library.url,
                tag: &record.tag,
                version: &record.version,
            };
            let content = self.renderer.render(&build_name, &context)?;
            files.push(GeneratedFile::new(
                build_file_path(&self.root, &library.name, record.version.as_str()),
                content,
            ));
        }

        let context = PipelineContext {
            library_name: &library.name,
            versions: &versions,
            settings: &settings,
        };
        let content = self.renderer.render(PIPELINE_TEMPLATE_FILENAME, &context)?;
        files.push(GeneratedFile::new(
            pipeline_file_path(&self.root, &library.name),
            content,
        ));

        Ok(Plan {
            library: library.name.clone(),
            versions,
            files,
        })
    }

    /// Render and write all files for a library.
    pub fn generate(&mut self, library: &TrackedLibrary, tags: &[String]) -> Result<LibraryReport> {
        info!("{}: generating files from {} tags", library.name, tags.len());
        let plan = self.plan(library, tags)?;
        write_plan(plan)
    }
}

/// Materialize a plan in order, stopping at the first failed write.
pub fn write_plan(plan: Plan) -> Result<LibraryReport> {
    let mut files = Vec::with_capacity(plan.files.len());
    for file in &plan.files {
        let outcome = file.write()?;
        if outcome == WriteOutcome::Unchanged {
            debug!("{}: unchanged {}", plan.library, file.path.display());
        } else {
            info!("{}: {:?} {}", plan.library, outcome, file.path.display());
        }
        files.push((file.path.clone(), outcome));
    }
    Ok(LibraryReport {
        library: plan.library,
        versions: plan.versions,
        files,
    })
}
