//! macOS packaging backends.

pub mod pkg;
