//! Core Settings struct and implementations.

use super::{PackageSettings, PkgSettings, PkgTemplates};
use crate::bundler::platform::PackageType;
use std::path::{Path, PathBuf};

/// Immutable parameters of one installer build.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). All derived
/// paths are resolved against the working directory, which defaults to `.`.
///
/// # Examples
///
/// ```no_run
/// use kd_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> kd_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .binary_path("/tmp/mytool")
///     .build()?;
///
/// assert_eq!(settings.app_name(), "mytool");
/// assert_eq!(settings.identifier(), "com.koding.kite.mytool.pkg");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Installer layout.
    pkg: PkgSettings,

    /// Template bodies.
    templates: PkgTemplates,

    /// Binary being packaged.
    binary_path: PathBuf,

    /// Directory the staging tree, scripts and installer are written to.
    work_dir: PathBuf,

    /// Backend to build with.
    ///
    /// None means derive it from the host operating system.
    package_type: Option<PackageType>,
}

impl Settings {
    /// Returns the application name.
    pub fn app_name(&self) -> &str {
        &self.package.app_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the base name of the final installer, without extension.
    pub fn output_name(&self) -> String {
        match &self.package.output_name {
            Some(name) => name.clone(),
            None => format!("{}-{}", self.pkg.product, self.package.app_name),
        }
    }

    /// Returns the path of the binary being packaged.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Returns the working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the installer layout settings.
    pub fn pkg_settings(&self) -> &PkgSettings {
        &self.pkg
    }

    /// Returns the template bodies.
    pub fn templates(&self) -> &PkgTemplates {
        &self.templates
    }

    /// Returns the configured backend, if any.
    pub fn package_type(&self) -> Option<PackageType> {
        self.package_type
    }

    /// launchd label of the agent, e.g. `com.koding.kite.mytool`.
    pub fn agent_label(&self) -> String {
        format!("{}.{}", self.pkg.identifier_prefix, self.package.app_name)
    }

    /// Package identifier, e.g. `com.koding.kite.mytool.pkg`.
    ///
    /// Also used as the component package's file name.
    pub fn identifier(&self) -> String {
        format!("{}.pkg", self.agent_label())
    }

    /// Staging root standing in for `/` on the target machine.
    pub fn install_root(&self) -> PathBuf {
        self.work_dir.join(&self.pkg.install_root)
    }

    /// Directory inside the staging root that receives the binary.
    pub fn install_bin_dir(&self) -> PathBuf {
        self.install_root().join(&self.pkg.bin_dir)
    }

    /// Directory inside the staging root that receives the agent descriptor.
    pub fn launch_agents_dir(&self) -> PathBuf {
        self.install_root().join(&self.pkg.launch_agents_dir)
    }

    /// Lifecycle script directory.
    pub fn scripts_dir(&self) -> PathBuf {
        self.work_dir.join(&self.pkg.scripts_dir)
    }

    /// Rendered distribution descriptor path.
    pub fn distribution_file(&self) -> PathBuf {
        self.work_dir.join(&self.pkg.distribution_file)
    }

    /// Presentation resources directory.
    pub fn resources_dir(&self) -> PathBuf {
        self.work_dir.join(&self.pkg.resources_dir)
    }

    /// Path of the final installer for the given backend.
    pub fn installer_path(&self, package_type: PackageType) -> PathBuf {
        self.work_dir
            .join(format!("{}.{}", self.output_name(), package_type.extension()))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        pkg: PkgSettings,
        templates: PkgTemplates,
        binary_path: PathBuf,
        work_dir: PathBuf,
        package_type: Option<PackageType>,
    ) -> Self {
        Self {
            package,
            pkg,
            templates,
            binary_path,
            work_dir,
            package_type,
        }
    }
}
