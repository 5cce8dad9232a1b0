//! Builder for constructing Settings.

use super::{
    DEFAULT_VERSION, PackageSettings, PkgSettings, PkgTemplates, Settings, validate_app_name,
};
use crate::bundler::{error::Error, platform::PackageType};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Only the binary path is required. Everything else falls back to the
/// defaults of a Koding kite installer.
///
/// # Examples
///
/// ```no_run
/// use kd_bundler::bundler::{PackageType, SettingsBuilder};
///
/// # fn example() -> kd_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .binary_path("/tmp/mytool")
///     .version("1.2.0")
///     .work_dir("/tmp/build")
///     .package_type(PackageType::Pkg)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    binary_path: Option<PathBuf>,
    version: Option<String>,
    output_name: Option<String>,
    work_dir: Option<PathBuf>,
    pkg_settings: PkgSettings,
    templates: PkgTemplates,
    package_type: Option<PackageType>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the binary to package. Its base name becomes the application name.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn binary_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.binary_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the package version.
    ///
    /// Default: [`DEFAULT_VERSION`]
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the installer base name (without extension).
    ///
    /// Default: `<product>-<app_name>`
    pub fn output_name<S: Into<String>>(mut self, name: S) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Sets the working directory all build paths are resolved against.
    ///
    /// Default: `.`
    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the installer layout.
    ///
    /// Default: [`PkgSettings::default`]
    pub fn pkg_settings(mut self, settings: PkgSettings) -> Self {
        self.pkg_settings = settings;
        self
    }

    /// Sets the template bodies.
    ///
    /// Default: the built-in Koding kite templates
    pub fn templates(mut self, templates: PkgTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Selects the packaging backend.
    ///
    /// Default: None (derived from the host OS when bundling)
    pub fn package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = Some(package_type);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `binary_path` is missing
    /// - the binary's base name is not a valid application name
    /// - an explicit output name is empty
    /// - the installer layout is rejected by [`PkgSettings::validate`]
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let binary_path = self.binary_path.context("binary_path is required")?;

        let app_name = binary_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidAppName {
                name: binary_path.display().to_string(),
                reason: "binary path has no UTF-8 file name",
            })?
            .to_string();
        validate_app_name(&app_name)?;

        self.pkg_settings.validate(&self.templates)?;

        if self.output_name.as_deref() == Some("") {
            return Err(Error::GenericError("output name cannot be empty".into()));
        }

        let package = PackageSettings {
            app_name,
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            output_name: self.output_name,
        };

        Ok(Settings::new(
            package,
            self.pkg_settings,
            self.templates,
            binary_path,
            self.work_dir.unwrap_or_else(|| PathBuf::from(".")),
            self.package_type,
        ))
    }
}
