//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that runs a
//! platform packaging backend to create a native installer.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Selects the packaging backend (configured, or derived from the host)
//! 3. Delegates to the platform-specific module
//! 4. Calculates size and checksum of the result
//! 5. Returns a [`BundledArtifact`](crate::bundler::BundledArtifact)
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations

mod checksum;
mod orchestrator;

pub use orchestrator::Bundler;
