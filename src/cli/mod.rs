//! Command line interface for kd.
//!
//! This module wires parsed arguments to the command implementations and
//! reports the outcome to the user.

mod args;
pub mod commands;

pub use args::{Args, BuildArgs, Command};

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    match args.command {
        Command::Build(build) => {
            let artifact = commands::build::execute(&build).await?;
            for path in &artifact.paths {
                println!("✓ build successful: {}", path.display());
            }
            log::debug!("SHA256 {} ({} bytes)", artifact.checksum, artifact.size);
        }
    }

    Ok(0)
}
