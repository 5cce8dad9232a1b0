//! Component package creation with pkgbuild.

use crate::bundler::{
    error::Result,
    settings::Settings,
    utils::command::{CommandRunner, path_arg, run_tool},
};
use std::path::{Path, PathBuf};

/// Builds the relocatable component package into `out_dir`.
///
/// Invokes
/// `pkgbuild --identifier <id> --version <v> --scripts <dir> --root <root>
/// --install-location / <out_dir>/<id>` and returns the component path.
pub async fn build_component<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    scripts_dir: &Path,
    out_dir: &Path,
) -> Result<PathBuf> {
    let identifier = settings.identifier();
    let component = out_dir.join(&identifier);

    let args = vec![
        "--identifier".to_string(),
        identifier,
        "--version".to_string(),
        settings.version_string().to_string(),
        "--scripts".to_string(),
        path_arg(scripts_dir)?,
        "--root".to_string(),
        path_arg(&settings.install_root())?,
        "--install-location".to_string(),
        "/".to_string(),
        path_arg(&component)?,
    ];

    log::info!("Building component package {}", component.display());
    run_tool(runner, &settings.pkg_settings().pkgbuild, &args).await?;

    Ok(component)
}
