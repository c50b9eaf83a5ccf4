//! Completion tree nodes

use crate::complete::dir::list_dir;
use crate::complete::order::sort_for_completion;
use crate::error::DirectoryReadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// What a node offers as completions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Container only, offers nothing itself
    Root,
    /// A literal sub-command token
    String,
    /// Entries of the directory `name`
    FileList,
    /// Static flags, active once the prefix starts with `-`
    Options,
    /// Flags of the form `--flag=` whose value completes from the children
    OptionsWithCompletion,
    /// Static candidates, always active
    Custom,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Root => "root",
            NodeKind::String => "string",
            NodeKind::FileList => "file-list",
            NodeKind::Options => "options",
            NodeKind::OptionsWithCompletion => "options-with-completion",
            NodeKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// A node of the completion tree. Parents own their children.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionNode {
    /// Literal token, directory path or label, depending on `kind`
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<CompletionNode>,
    /// Static candidates of options and custom nodes
    pub entries: Vec<String>,
}

impl CompletionNode {
    fn with_kind(kind: NodeKind, name: impl Into<String>) -> Self {
        CompletionNode {
            name: name.into(),
            kind,
            children: Vec::new(),
            entries: Vec::new(),
        }
    }

    fn with_entries<I, S>(kind: NodeKind, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = Self::with_kind(kind, "");
        node.entries = entries.into_iter().map(Into::into).collect();
        node
    }

    pub fn root() -> Self {
        Self::with_kind(NodeKind::Root, "")
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::String, name)
    }

    pub fn file_list(dir: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::FileList, dir)
    }

    pub fn options<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_entries(NodeKind::Options, entries)
    }

    pub fn options_with_completion<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_entries(NodeKind::OptionsWithCompletion, entries)
    }

    pub fn custom<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_entries(NodeKind::Custom, entries)
    }

    /// Set the label of a root, options or custom node
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_child(mut self, child: CompletionNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: CompletionNode) {
        self.children.push(child);
    }

    /// First direct child called `name`
    pub fn child(&self, name: &str) -> Option<&CompletionNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// What this node alone offers for `prefix`, with listing errors discarded
    pub fn self_completions(&self, prefix: &str) -> Vec<String> {
        self.try_self_completions(prefix).unwrap_or_else(|err| {
            debug!(dir = %self.name, error = %err, "file completion failed");
            Vec::new()
        })
    }

    /// What this node alone offers for `prefix`
    pub fn try_self_completions(&self, prefix: &str) -> Result<Vec<String>, DirectoryReadError> {
        let candidates = match self.kind {
            NodeKind::Root => Vec::new(),
            NodeKind::String => {
                if self.name.starts_with(prefix) {
                    vec![self.name.clone()]
                } else {
                    Vec::new()
                }
            }
            NodeKind::FileList => self.file_completions(prefix)?,
            NodeKind::Options => self.flag_completions(prefix),
            NodeKind::OptionsWithCompletion => match self.value_completions(prefix) {
                Some(values) => values,
                None => self.flag_completions(prefix),
            },
            NodeKind::Custom => self.matching_entries(prefix),
        };
        Ok(candidates)
    }

    /// Self-completions of every direct child, in child order
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.children
            .iter()
            .flat_map(|child| child.self_completions(prefix))
            .collect()
    }

    fn matching_entries(&self, prefix: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .cloned()
            .collect();
        sort_for_completion(&mut matches);
        matches
    }

    fn flag_completions(&self, prefix: &str) -> Vec<String> {
        if prefix.starts_with('-') {
            self.matching_entries(prefix)
        } else {
            Vec::new()
        }
    }

    /// `--flag=val` where `--flag=` is an entry completes `val` from the children
    fn value_completions(&self, prefix: &str) -> Option<Vec<String>> {
        let eq = prefix.find('=')?;
        let (flag, value) = (&prefix[..=eq], &prefix[eq + 1..]);
        if !self.entries.iter().any(|entry| entry == flag) {
            return None;
        }
        Some(
            self.completions(value)
                .into_iter()
                .map(|candidate| format!("{}{}", flag, candidate))
                .collect(),
        )
    }

    /// Entries of `name`, or of a subdirectory when the prefix holds a `/`.
    /// Hidden entries only show up for a prefix starting with `.`.
    fn file_completions(&self, prefix: &str) -> Result<Vec<String>, DirectoryReadError> {
        let (subdir, base) = match prefix.rfind('/') {
            Some(slash) => prefix.split_at(slash + 1),
            None => ("", prefix),
        };
        let dir = if subdir.is_empty() {
            Path::new(&self.name).to_path_buf()
        } else {
            Path::new(&self.name).join(subdir)
        };

        let show_hidden = base.starts_with('.');
        Ok(list_dir(&dir, base)?
            .into_iter()
            .filter(|name| show_hidden || !name.starts_with('.'))
            .map(|name| format!("{}{}", subdir, name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_root_offers_nothing() {
        let root = CompletionNode::root().with_child(CompletionNode::string("run"));
        assert!(root.self_completions("").is_empty());
        assert_eq!(root.completions("r"), vec!["run"]);
    }

    #[test]
    fn test_string_prefix_match() {
        let node = CompletionNode::string("status");
        assert_eq!(node.self_completions("st"), vec!["status"]);
        assert_eq!(node.self_completions(""), vec!["status"]);
        assert!(node.self_completions("x").is_empty());
    }

    #[test]
    fn test_options_need_dash() {
        let node = CompletionNode::options(["--help", "-h", "--version", "-v"]);
        assert!(node.self_completions("").is_empty());
        assert_eq!(
            node.self_completions("-"),
            vec!["-h", "--help", "-v", "--version"]
        );
        assert_eq!(node.self_completions("--h"), vec!["--help"]);
    }

    #[test]
    fn test_custom_always_active_and_sorted() {
        let node = CompletionNode::custom(["zeta", "alpha", "beta"]);
        assert_eq!(node.self_completions(""), vec!["alpha", "beta", "zeta"]);
        assert_eq!(node.self_completions("b"), vec!["beta"]);
    }

    #[test]
    fn test_options_with_completion_values() {
        let node = CompletionNode::options_with_completion(["--color=", "--quiet"])
            .with_child(CompletionNode::custom(["never", "always", "auto"]));
        assert_eq!(node.self_completions("--c"), vec!["--color="]);
        assert_eq!(
            node.self_completions("--color=a"),
            vec!["--color=always", "--color=auto"]
        );
        assert!(node.self_completions("--quiet=x").is_empty());
        assert!(node.self_completions("").is_empty());
    }

    #[test]
    fn test_file_list_hides_dot_entries() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["aFile1", "aFile2", ".aFile2"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }
        let node = CompletionNode::file_list(temp_dir.path().to_string_lossy());
        assert_eq!(node.self_completions(""), vec!["aFile1", "aFile2"]);
        assert_eq!(node.self_completions("."), vec![".aFile2"]);
        assert_eq!(node.self_completions("aFile2"), vec!["aFile2"]);
    }

    #[test]
    fn test_file_list_descends_into_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src/bin")).unwrap();
        fs::write(temp_dir.path().join("src/main.rs"), "").unwrap();
        let node = CompletionNode::file_list(temp_dir.path().to_string_lossy());
        assert_eq!(node.self_completions("s"), vec!["src/"]);
        assert_eq!(node.self_completions("src/"), vec!["src/bin/", "src/main.rs"]);
        assert_eq!(node.self_completions("src/m"), vec!["src/main.rs"]);
    }

    #[test]
    fn test_file_list_error_is_surfaced_or_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let node = CompletionNode::file_list(temp_dir.path().join("gone").to_string_lossy());
        assert!(node.try_self_completions("").is_err());
        assert!(node.self_completions("").is_empty());
    }

    #[test]
    fn test_self_completions_idempotent() {
        let node = CompletionNode::custom(["b", ".b", "a"]);
        assert_eq!(node.self_completions(""), node.self_completions(""));
    }

    #[test]
    fn test_child_lookup() {
        let root = CompletionNode::root()
            .with_child(CompletionNode::string("log"))
            .with_child(CompletionNode::string("log"));
        assert!(root.child("log").is_some());
        assert!(root.child("missing").is_none());
    }

    #[test]
    fn test_completions_keep_child_order_without_dedup() {
        let root = CompletionNode::root()
            .with_child(CompletionNode::string("b"))
            .with_child(CompletionNode::custom(["a", "b"]));
        assert_eq!(root.completions(""), vec!["b", "a", "b"]);
    }
}
