//! optree - typed command-line options and shell completion trees
//!
//! Two engines make up the library: [`option`] converts raw command-line
//! tokens into typed values under a declared schema, and [`complete`]
//! answers shell completion requests from a static tree describing a
//! program's sub-commands, flags and arguments.

// Public modules
pub mod cli;
pub mod complete;
pub mod config;
pub mod error;
pub mod option;

// Re-export commonly used types
pub use complete::{complete_line, CompletionNode, NodeKind};
pub use error::{ConversionError, OptionError, OptreeError, Result};
pub use option::{Kind, Opt, OptionSet, Value};

/// Current version of optree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
