//! macOS installer package (.pkg) creator.
//!
//! Produces a double-clickable installer that puts the binary into
//! `/usr/local/bin` and, optionally, registers it as a launchd agent.
//!
//! # Architecture
//!
//! - `staging` - staging root mirroring `/` on the target machine
//! - `scripts` - lifecycle scripts and descriptors rendered from templates
//! - `template` - default template bodies
//! - `component` - component package via pkgbuild
//! - `distribution` - final installer via productbuild

mod component;
mod distribution;
mod scripts;
mod staging;
pub mod template;

pub use scripts::ScriptGenerator;

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::Settings,
    utils::command::CommandRunner,
};
use std::path::PathBuf;

/// Bundle project as a macOS installer package.
///
/// # Process
/// 1. Recreate the staging root and copy the binary into it
/// 2. Render preInstall / postInstall scripts
/// 3. Render the launch agent into the staging root (if enabled)
/// 4. Build the component package into a private temporary directory
/// 5. Render Distribution.xml and assemble the final installer
/// 6. Remove the temporary directory
///
/// The staging root, scripts and descriptor stay on disk. The temporary
/// directory is removed on every exit path.
///
/// # Returns
/// Vector containing the path to the created installer.
pub async fn bundle_project<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
) -> Result<Vec<PathBuf>> {
    log::info!("Creating installer package for {}", settings.app_name());

    let generator = ScriptGenerator::new(settings.templates())?;

    staging::build_install_root(settings).await?;
    let scripts_dir = scripts::write_lifecycle_scripts(settings, &generator).await?;
    if settings.pkg_settings().launch_agent {
        scripts::write_launch_agent(settings, &generator).await?;
    }

    let temp_dir = tempfile::Builder::new()
        .prefix("kd-pkg")
        .tempdir()
        .fs_context("creating component directory", std::env::temp_dir())?;
    log::debug!("Component output directory: {}", temp_dir.path().display());

    component::build_component(settings, runner, &scripts_dir, temp_dir.path()).await?;
    let installer =
        distribution::build_product(settings, runner, &generator, temp_dir.path()).await?;

    let temp_path = temp_dir.path().to_path_buf();
    temp_dir
        .close()
        .fs_context("removing component directory", temp_path)?;

    log::info!("✓ Created installer package: {}", installer.display());

    Ok(vec![installer])
}
