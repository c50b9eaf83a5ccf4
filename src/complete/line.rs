//! Resolve a completion-request line against a completion tree

use crate::complete::{CompletionNode, NodeKind};
use tracing::trace;

/// Completions for `line`, the command line typed so far (`$COMP_LINE`).
///
/// The line is split on single spaces, so file names containing spaces are
/// not handled. The first token is the executable and is ignored.
pub fn complete_line(root: &CompletionNode, line: &str) -> Vec<String> {
    let tokens: Vec<&str> = line.split(' ').skip(1).collect();
    trace!(node = %root.name, ?tokens, "resolving completion line");

    let Some((&token, rest)) = tokens.split_first() else {
        return root.completions("");
    };

    if rest.is_empty() {
        let candidates = root.completions(token);
        if candidates.len() > 1 {
            return candidates;
        }
    }

    match root.child(token) {
        Some(child) if child.kind == NodeKind::String => {
            trace!(command = token, "descending into sub-command");
            complete_line(child, &tokens.join(" "))
        }
        _ => root.completions(token),
    }
}

impl CompletionNode {
    /// Completions for a completion-request line rooted at this node
    pub fn complete_line(&self, line: &str) -> Vec<String> {
        complete_line(self, line)
    }
}
