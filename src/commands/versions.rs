//! # Versions Command Implementation
//!
//! Prints the versions a library would build, one `version<TAB>tag` line per
//! release in build order. Read-only; useful for checking a rule set against
//! a new upstream tag scheme before generating anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use dockergen::pipeline::Generator;
use dockergen::rules::Registry;

use super::{load_config, read_tags};
use crate::cli::GlobalArgs;

/// Print the versions a library would build
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Name of the tracked library
    #[arg(value_name = "LIBRARY")]
    pub library: String,

    /// Read tags from this file (one per line) instead of the upstream clone
    #[arg(long, value_name = "FILE")]
    pub tags_file: Option<PathBuf>,
}

/// Execute the versions command
pub fn execute(args: VersionsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let library = config.library(&args.library)?;
    let registry = Registry::builtin()?;

    let tags = read_tags(global, &library.name, args.tags_file.as_deref())?;
    let generator = Generator::new(&global.root, &registry);
    for record in generator.versions(library, &tags)? {
        println!("{}\t{}", record.version, record.tag);
    }
    Ok(())
}
