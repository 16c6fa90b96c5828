//! # Generate Command Implementation
//!
//! Regenerates the Dockerfiles and pipeline definition of a single library.
//! Tags come from `--tags-file` when given, otherwise from the library's
//! local upstream clone. No git command that changes state is run, which
//! makes this the command to use while editing templates.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use dockergen::pipeline::Generator;
use dockergen::rules::Registry;

use super::{load_config, print_report, read_tags};
use crate::cli::GlobalArgs;

/// Regenerate files for one library
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Name of the tracked library
    #[arg(value_name = "LIBRARY")]
    pub library: String,

    /// Read tags from this file (one per line) instead of the upstream clone
    #[arg(long, value_name = "FILE")]
    pub tags_file: Option<PathBuf>,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let library = config.library(&args.library)?;
    let registry = Registry::builtin()?;

    let tags = read_tags(global, &library.name, args.tags_file.as_deref())?;
    let mut generator = Generator::new(&global.root, &registry);
    let report = generator.generate(library, &tags)?;

    print_report(&report);
    Ok(())
}
