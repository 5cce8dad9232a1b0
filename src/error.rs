//! Top-level error types.
//!
//! This module defines the errors surfaced by the `kd` binary together with
//! recovery suggestions printed after a failed build.

use crate::bundler::Error as PkgError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] PkgError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing required argument
    #[error("Missing required argument: {argument}\nUsage: {usage}")]
    MissingArgument {
        /// Argument name
        argument: String,
        /// Usage line for the command
        usage: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let mut suggestions = Vec::new();
        let mut current = match self {
            BundlerError::Bundler(err) => Some(err),
            BundlerError::Cli(CliError::MissingArgument { usage, .. }) => {
                suggestions.push(format!("Pass the binary to package: {usage}"));
                None
            }
            BundlerError::Toml(_) => {
                suggestions.push("Check the configuration file for typos or unknown keys".into());
                None
            }
            _ => None,
        };

        // look through context wrappers for the root cause
        while let Some(PkgError::Context(_, inner)) = current {
            current = Some(inner.as_ref());
        }

        match current {
            Some(PkgError::UnsupportedPlatform(os)) => suggestions.push(format!(
                "Installer packages can only be built on macOS (running on {os})"
            )),
            Some(PkgError::UnsupportedPackageType(kind)) => suggestions.push(format!(
                "Select package_type = \"pkg\" instead of \"{kind}\""
            )),
            Some(PkgError::CommandFailed { command, .. }) => suggestions.push(format!(
                "Make sure {command} is installed (xcode-select --install) and on PATH"
            )),
            Some(PkgError::ToolFailed { command, .. }) => suggestions.push(format!(
                "Inspect the {command} output above; the staging tree is kept for debugging"
            )),
            Some(PkgError::InvalidAppName { .. }) => {
                suggestions.push("Rename the binary to a plain file name".into())
            }
            Some(PkgError::InvalidLayout { field, .. }) => suggestions.push(format!(
                "Set [pkg] {field} to a relative path inside the working directory"
            )),
            Some(PkgError::Fs { path, .. }) => {
                suggestions.push(format!("Check that {} is accessible", path.display()))
            }
            _ => {}
        }

        if suggestions.is_empty() {
            suggestions.push("Check the error message above for specific details".to_string());
        }
        suggestions
    }
}
