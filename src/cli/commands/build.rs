//! `kd build`: package a binary into an installer.

use crate::bundler::{
    BundledArtifact, Bundler, CommandRunner, SettingsBuilder, SystemCommandRunner,
};
use crate::cli::BuildArgs;
use crate::config::load_config;
use crate::error::{CliError, Result};
use std::path::Path;

/// Usage line reported when the binary argument is missing.
pub const USAGE: &str = "kd build <binary>";

/// Builds an installer in the current directory with the real packaging tools.
pub async fn execute(args: &BuildArgs) -> Result<BundledArtifact> {
    execute_with(args, Path::new("."), SystemCommandRunner).await
}

/// Builds an installer in `work_dir`, running tools through `runner`.
pub async fn execute_with<R: CommandRunner>(
    args: &BuildArgs,
    work_dir: &Path,
    runner: R,
) -> Result<BundledArtifact> {
    let binary = args
        .binary
        .as_deref()
        .ok_or_else(|| CliError::MissingArgument {
            argument: "BINARY".to_string(),
            usage: USAGE.to_string(),
        })?;

    let mut builder = SettingsBuilder::new().binary_path(binary).work_dir(work_dir);
    if let Some(config) = &args.config {
        builder = load_config(config)?.apply(builder);
    }
    let settings = builder.build()?;

    let artifact = Bundler::with_runner(settings, runner).bundle().await?;
    Ok(artifact)
}
