//! Schema files
//!
//! An optree.yml file declares a program's options and its completion
//! tree. This module finds, parses and validates it, and builds the
//! runtime option set and completion tree from it.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
