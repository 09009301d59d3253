//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::environment::BuildFlags;
use crate::plan::PlanFormat;

/// bxplan - Resolve browser extension build plans.
#[derive(Debug, Parser)]
#[command(name = "bxplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Path to a .env file (defaults to <project>/.env)
    #[arg(long, global = true, conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not read any .env file
    #[arg(long, global = true)]
    pub no_env_file: bool,

    /// Show resolution details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and print the build plan (default if no command specified)
    Plan(PlanArgs),

    /// Show the resolved environment and where each value came from
    Env(EnvArgs),

    /// Print the JSON Schema of a build plan
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Environment inputs shared by `plan` and `env`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TargetArgs {
    /// Browser target(s); one plan per browser (comma-separated or repeated)
    #[arg(short, long, value_delimiter = ',')]
    pub browser: Vec<String>,

    /// Node environment mode (development, production)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Package version (overrides npm_package_version and package.json)
    #[arg(long)]
    pub package_version: Option<String>,
}

impl TargetArgs {
    /// Convert to the flags environment resolution takes.
    pub fn to_flags(&self) -> BuildFlags {
        BuildFlags {
            browsers: self.browser.clone(),
            mode: self.mode.clone(),
            package_version: self.package_version.clone(),
        }
    }
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = PlanFormat::Json)]
    pub format: PlanFormat,

    /// Write the plan to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Accept missing browser or version and render them as "undefined"
    #[arg(long)]
    pub permissive: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
