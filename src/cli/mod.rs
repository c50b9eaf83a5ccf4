//! CLI interface
//!
//! This module wires the schema file, the option parser and the completion
//! resolver into the `optree` command.

pub mod app;

// Re-export main types
pub use app::*;
