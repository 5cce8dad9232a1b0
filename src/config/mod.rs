//! Build configuration file.
//!
//! An optional TOML file overriding the defaults of a build:
//!
//! ```toml
//! version = "1.4.0"
//! output = "kite-installer"
//! package_type = "pkg"
//!
//! [pkg]
//! install_root = "root"
//! launch_agent = false
//! ```

use crate::bundler::{PackageType, PkgSettings, SettingsBuilder};
use crate::error::{BundlerError, CliError, Result};
use std::path::Path;

/// Parsed build configuration.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Package version
    pub version: Option<String>,

    /// Installer base name, without extension
    pub output: Option<String>,

    /// Packaging backend
    pub package_type: Option<PackageType>,

    /// Installer layout overrides
    #[serde(default)]
    pub pkg: PkgSettings,
}

impl BuildConfig {
    /// Applies every configured value to `builder`.
    pub fn apply(self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(version) = self.version {
            builder = builder.version(version);
        }
        if let Some(output) = self.output {
            builder = builder.output_name(output);
        }
        if let Some(package_type) = self.package_type {
            builder = builder.package_type(package_type);
        }
        builder.pkg_settings(self.pkg)
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<BuildConfig> {
    Ok(toml::from_str(contents)?)
}

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_config".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    log::debug!("Loaded build configuration from {}", path.display());
    parse_config(&contents)
}
