//! Staging tree construction.
//!
//! The staging root mirrors `/` on the target machine. It is rebuilt from
//! scratch on every build and left on disk afterwards. A failed copy leaves
//! the partially created tree behind; the next build removes it.

use crate::bundler::{
    error::{Context, Result},
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

/// Mode of the binary install directory and of the installed binary.
const BIN_MODE: u32 = 0o755;

/// Recreates the staging root and copies the binary into its install directory.
///
/// Returns the path of the staged binary.
pub async fn build_install_root(settings: &Settings) -> Result<PathBuf> {
    let install_root = settings.install_root();
    log::info!("Preparing staging root {}", install_root.display());

    fs::remove_dir_all(&install_root).await?;

    let bin_dir = settings.install_bin_dir();
    fs::create_dir_all_with_mode(&bin_dir, BIN_MODE).await?;

    let staged = bin_dir.join(settings.app_name());
    fs::copy_file(settings.binary_path(), &staged)
        .await
        .with_context(|| format!("staging binary {}", settings.binary_path().display()))?;

    // Ensure executable permissions
    fs::set_mode(&staged, BIN_MODE).await?;

    log::debug!("Staged binary at {}", staged.display());
    Ok(staged)
}
