//! Distribution package assembly with productbuild.

use super::scripts::{self, ScriptGenerator};
use crate::bundler::{
    error::Result,
    platform::PackageType,
    settings::Settings,
    utils::command::{CommandRunner, path_arg, run_tool},
};
use std::path::{Path, PathBuf};

/// Renders the distribution descriptor and runs productbuild.
///
/// `package_path` is the directory holding the component package built by
/// pkgbuild. Invokes
/// `productbuild --distribution <file> --resources <dir> --package-path
/// <package_path> <output>.pkg` and returns the installer path.
pub async fn build_product<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    generator: &ScriptGenerator,
    package_path: &Path,
) -> Result<PathBuf> {
    let distribution = scripts::write_distribution(settings, generator).await?;

    let resources = settings.resources_dir();
    if !resources.is_dir() {
        log::warn!(
            "Resources directory {} not found; productbuild may reject it",
            resources.display()
        );
    }

    let installer = settings.installer_path(PackageType::Pkg);

    let args = vec![
        "--distribution".to_string(),
        path_arg(&distribution)?,
        "--resources".to_string(),
        path_arg(&resources)?,
        "--package-path".to_string(),
        path_arg(package_path)?,
        path_arg(&installer)?,
    ];

    log::info!("Assembling installer {}", installer.display());
    run_tool(runner, &settings.pkg_settings().productbuild, &args).await?;

    Ok(installer)
}
