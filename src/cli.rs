//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;

/// dockergen - Regenerate per-version Dockerfiles from upstream release tags
#[derive(Parser, Debug)]
#[command(name = "dockergen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory containing one subdirectory per tracked library
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to <root>/dockergen.yaml, or the built-in
    /// library list when that file does not exist)
    #[arg(long, global = true, value_name = "FILE", env = "DOCKERGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        env = "DOCKERGEN_LOG",
        default_value = "info"
    )]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update upstreams, regenerate files for every library and optionally commit
    Sync(commands::sync::SyncArgs),

    /// Regenerate files for one library without any git writes
    Generate(commands::generate::GenerateArgs),

    /// Print the versions a library would build
    Versions(commands::versions::VersionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.global.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &self.global),
            Commands::Generate(args) => commands::generate::execute(args, &self.global),
            Commands::Versions(args) => commands::versions::execute(args, &self.global),
        }
    }
}
