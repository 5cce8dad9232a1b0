//! Package metadata and configuration.

use crate::bundler::error::{Error, Result};

/// Version stamped into the component package when none is configured.
pub const DEFAULT_VERSION: &str = "0.0.1";

/// Package metadata for one build.
///
/// The application name always comes from the source binary's file name; it
/// is embedded verbatim into install paths and into the reverse-domain
/// package identifier.
///
/// # Examples
///
/// ```no_run
/// use kd_bundler::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     app_name: "mytool".into(),
///     version: "0.0.1".into(),
///     output_name: None,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Application name, equal to the binary's base name.
    pub app_name: String,

    /// Version string passed to the component packaging tool.
    ///
    /// Default: [`DEFAULT_VERSION`]
    pub version: String,

    /// Base name of the final installer file, without extension.
    ///
    /// Default: None (`<product>-<app_name>`)
    pub output_name: Option<String>,
}

/// Checks that `name` can be used as a path component and identifier segment.
///
/// Accepts ASCII alphanumerics, `-`, `_` and `.`; rejects empty names and
/// the special directory names `.` and `..`.
pub fn validate_app_name(name: &str) -> Result<()> {
    let reject = |reason| {
        Err(Error::InvalidAppName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return reject("name is empty");
    }
    if name == "." || name == ".." {
        return reject("name is a directory reference");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return reject("only ASCII letters, digits, '-', '_' and '.' are allowed");
    }

    Ok(())
}
