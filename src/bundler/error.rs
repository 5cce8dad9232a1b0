//! Error types for bundling operations.
//!
//! Every stage of the installer pipeline reports failures through [`Error`].
//! Filesystem failures carry the action and path that failed, external tool
//! failures carry the tool's exit code and combined output.

use crate::bundler::platform::PackageType;
use std::{fmt::Display, io, path::PathBuf};

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building an installer package.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem operation failed on a specific path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What the bundler was doing
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying io error
        #[source]
        error: io::Error,
    },

    /// External command could not be launched.
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Launch error
        #[source]
        error: io::Error,
    },

    /// External tool ran but reported failure.
    #[error("{command} failed ({}):\n{output}", describe_exit(*code))]
    ToolFailed {
        /// Program name
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Combined stdout and stderr of the tool
        output: String,
    },

    /// Host operating system has no packaging backend.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Backend is selectable but has no implementation.
    #[error("package type {0} is not implemented")]
    UnsupportedPackageType(PackageType),

    /// Application name cannot be embedded in paths and identifiers.
    #[error("invalid application name {name:?}: {reason}")]
    InvalidAppName {
        /// Offending name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Installer layout would break the build or touch files outside it.
    #[error("invalid pkg layout {field} = {}: {reason}", path.display())]
    InvalidLayout {
        /// `PkgSettings` field name
        field: &'static str,
        /// Configured value
        path: PathBuf,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Template registration or rendering failed.
    #[error("template {name}: {reason}")]
    Template {
        /// Registered template name
        name: &'static str,
        /// Handlebars error text
        reason: String,
    },

    /// Final stage succeeded but its output file is absent.
    #[error("expected artifact was not created: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// IO error without path information.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error wrapped with a description of the failed step.
    #[error("{0}: {1}")]
    Context(String, Box<Error>),

    /// Free-form error.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Attaches filesystem context to io results.
pub trait ErrorExt<T> {
    /// Converts an io error into [`Error::Fs`] naming the action and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Adds a human readable description to a failure.
pub trait Context<T> {
    /// Wraps the error (or `None`) with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily computed variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
