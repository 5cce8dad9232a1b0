//! Installer bundler library for Koding kite binaries.
//!
//! This library packages a prebuilt executable into a macOS installer
//! package (.pkg) that installs it to `/usr/local/bin` and registers it as
//! a launchd agent.
//!
//! It can be used both as a CLI tool (`kd build`) and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
