//! Installer bundling.
//!
//! Turns a prebuilt binary into a native installer package: a staging tree
//! mirroring the target filesystem, lifecycle scripts and descriptors
//! rendered from templates, and the platform packaging tools driven over
//! those inputs.
//!
//! # Example
//!
//! ```no_run
//! use kd_bundler::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> kd_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new().binary_path("/tmp/mytool").build()?;
//! let artifact = Bundler::new(settings).bundle().await?;
//! println!("SHA256: {}", artifact.checksum);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

use std::path::PathBuf;

pub use builder::Bundler;
pub use error::{Error, Result};
pub use platform::PackageType;
pub use settings::{PackageSettings, PkgSettings, PkgTemplates, Settings, SettingsBuilder};
pub use utils::command::{CommandOutput, CommandRunner, SystemCommandRunner};

/// Result of a successful build.
#[derive(Clone, Debug)]
pub struct BundledArtifact {
    /// Backend that produced the artifact
    pub package_type: PackageType,
    /// Files written by the backend
    pub paths: Vec<PathBuf>,
    /// Combined size of `paths` in bytes
    pub size: u64,
    /// Hex SHA-256 of the first path
    pub checksum: String,
}
