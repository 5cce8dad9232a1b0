//! Command line argument parsing.
//!
//! This module provides the `kd` argument model using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Koding kite deployment tool
#[derive(Parser, Debug)]
#[command(
    name = "kd",
    version,
    about = "Koding kite deployment tool",
    long_about = "Builds deployable install packages for kite binaries.

Usage:
  kd build ./mytool
  kd build ./mytool --config kd.toml

The installer is written to ./koding-<name>.pkg. The staging tree (./root) and
generated scripts (./darwin) are kept next to it."
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build deployable install packages
    Build(BuildArgs),
}

/// Arguments of `kd build`
#[derive(clap::Args, Debug, Default)]
pub struct BuildArgs {
    /// Path to the binary to package; its file name becomes the application name
    #[arg(value_name = "BINARY")]
    pub binary: Option<PathBuf>,

    /// TOML file overriding version, output name and installer layout
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
