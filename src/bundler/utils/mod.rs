//! Shared helpers for bundling: filesystem operations and external tool execution.

pub mod command;
pub mod fs;
