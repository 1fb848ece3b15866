//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::SettingsOverrides;

/// armory - Bootstrap a security toolkit into your tools directory.
#[derive(Debug, Parser)]
#[command(name = "armory")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output (echo commands and their output)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
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
    /// Install every tool (default if no command specified)
    Run(RunArgs),

    /// List the installation steps in order
    List(ListArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Directory to clone tools and copy binaries into [default: home directory]
    #[arg(long, env = "ARMORY_TARGET_DIR", value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Shell startup file to add the PATH export to [default: from $SHELL]
    #[arg(long, env = "ARMORY_PROFILE", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Never prefix system package installs with sudo
    #[arg(long)]
    pub no_sudo: bool,

    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Run only specified steps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip specified steps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Exit non-zero if any step failed
    #[arg(long)]
    pub strict: bool,
}

impl RunArgs {
    /// The settings these flags override.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            target_dir: self.target_dir.clone(),
            profile: self.profile.clone(),
            no_sudo: self.no_sudo,
        }
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
