//! Platform packaging backends.
//!
//! Each [`PackageType`] names one installer backend. The orchestrator matches
//! on it to pick the routine that builds the artifact, so adding a backend is
//! a new variant plus a new module here.

pub mod macos;

use crate::bundler::error::{Error, Result};
use std::fmt;

/// Installer backend used for a build.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// macOS flat installer package (.pkg) built with pkgbuild + productbuild
    Pkg,
    /// Debian package. Selectable, but no backend exists yet.
    Deb,
}

impl PackageType {
    /// Backend for the operating system this binary was compiled for.
    pub fn for_host() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Backend for an operating system name as reported by `std::env::consts::OS`.
    ///
    /// Only `macos` has a working backend; every other name is rejected.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "macos" => Ok(PackageType::Pkg),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// File extension of the final artifact.
    pub fn extension(self) -> &'static str {
        match self {
            PackageType::Pkg => "pkg",
            PackageType::Deb => "deb",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
