//! Configuration structures for bundling operations.
//!
//! This module provides the configuration types for an installer build:
//! package metadata derived from the source binary, installer layout
//! settings, template bodies, and a builder that assembles them into
//! [`Settings`].

mod builder;
mod core;
mod macos;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use macos::{PkgSettings, PkgTemplates};
pub use package::{DEFAULT_VERSION, PackageSettings, validate_app_name};
