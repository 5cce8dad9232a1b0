//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that selects the
//! packaging backend and runs its pipeline to create the installer.

use crate::bundler::{
    BundledArtifact, PackageType, Result, Settings,
    error::{Error, ErrorExt},
    utils::command::{CommandRunner, SystemCommandRunner},
};

use super::checksum::calculate_sha256;

/// Main bundler orchestrator.
///
/// Runs one packaging backend per build. Stages run strictly in order and
/// the first failure aborts the build; nothing already staged is rolled
/// back.
///
/// # Examples
///
/// ```no_run
/// use kd_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> kd_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new().binary_path("/tmp/mytool").build()?;
/// let artifact = Bundler::new(settings).bundle().await?;
/// println!("Created {} ({} bytes)", artifact.paths[0].display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R = SystemCommandRunner> {
    settings: Settings,
    runner: R,
}

impl Bundler<SystemCommandRunner> {
    /// Creates a bundler that runs the real packaging tools.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, SystemCommandRunner)
    }
}

impl<R: CommandRunner> Bundler<R> {
    /// Creates a bundler that runs external tools through `runner`.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Builds the installer with the configured backend.
    ///
    /// When no backend is configured it is derived from the host OS, which
    /// fails with [`Error::UnsupportedPlatform`] anywhere but macOS before
    /// touching the filesystem.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let package_type = match self.settings.package_type() {
            Some(package_type) => package_type,
            None => PackageType::for_host()?,
        };
        self.bundle_type(package_type).await
    }

    /// Builds the installer with an explicit backend.
    pub async fn bundle_type(&self, package_type: PackageType) -> Result<BundledArtifact> {
        log::info!(
            "Bundling {} as {} (version {})",
            self.settings.app_name(),
            package_type,
            self.settings.version_string()
        );

        let paths = match package_type {
            PackageType::Pkg => {
                crate::bundler::platform::macos::pkg::bundle_project(&self.settings, &self.runner)
                    .await?
            }
            PackageType::Deb => return Err(Error::UnsupportedPackageType(package_type)),
        };

        // Calculate artifact metadata
        let mut size = 0u64;
        for p in &paths {
            if !p.exists() {
                return Err(Error::MissingArtifact(p.clone()));
            }
            let metadata = tokio::fs::metadata(p)
                .await
                .fs_context("reading artifact metadata", p)?;
            size += metadata.len();
        }

        let checksum = if let Some(first_path) = paths.first() {
            calculate_sha256(first_path).await?
        } else {
            crate::bail!(
                "Platform bundler for {} returned no paths - this indicates a bundler bug",
                package_type
            );
        };

        Ok(BundledArtifact {
            package_type,
            paths,
            size,
            checksum,
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a reference to the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}
