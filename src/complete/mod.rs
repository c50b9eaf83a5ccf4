//! Shell completion
//!
//! A static tree of nodes describes the sub-commands, flags and argument
//! values of a program. Given the command line typed so far, the resolver
//! walks the tree and returns the candidates a shell should offer.

pub mod dir;
pub mod line;
pub mod node;
pub mod order;

pub use dir::list_dir;
pub use line::complete_line;
pub use node::{CompletionNode, NodeKind};
pub use order::{completion_cmp, sort_for_completion};
