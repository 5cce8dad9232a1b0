//! File system utilities for bundling.
//!
//! Idempotent directory removal, mode-aware directory creation and file
//! copies used to build the staging tree and the generated scripts.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Creates all directories of `path`; the leaf ends up with exactly `mode`.
///
/// Intermediate directories are created with `mode` subject to the umask.
/// Existing directories are left alone except for the leaf's mode.
pub async fn create_dir_all_with_mode(path: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(mode);

    builder
        .create(path)
        .await
        .fs_context("creating directory", path)?;

    set_mode(path, mode).await
}

/// Sets unix permission bits on `path`. No-op on other platforms.
pub async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .await
            .fs_context("setting permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);

    Ok(())
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from)
        .await
        .fs_context("reading source file", from)?;
    if !metadata.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Writes `contents` to `path`, replacing any existing file, then applies `mode`.
pub async fn write_file(path: &Path, contents: &str, mode: u32) -> Result<()> {
    fs::write(path, contents)
        .await
        .fs_context("writing file", path)?;
    set_mode(path, mode).await
}
