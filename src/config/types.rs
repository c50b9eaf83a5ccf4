//! Schema file types
//!
//! This module defines the data structures that represent an optree.yml file.

use crate::complete::NodeKind;
use crate::option::Kind;
use serde::{Deserialize, Serialize};

/// Top-level schema
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Schema {
    /// Program name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// One-line description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Options in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDecl>,

    /// Top-level completion nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completion: Vec<NodeDecl>,
}

/// An option declaration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionDecl {
    /// Canonical name
    pub name: String,

    /// Alternate spellings, a single string or a list
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_or_list"
    )]
    pub aliases: Vec<String>,

    /// Option type (bool, string, int, float, string-list, ...)
    #[serde(rename = "type", default = "default_option_kind")]
    pub kind: Kind,

    /// Default value, as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Required option
    #[serde(default)]
    pub required: bool,

    /// Message used when a required option is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_args: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_args: Option<usize>,

    /// Lower-case string map keys
    #[serde(default)]
    pub lowercase_keys: bool,
}

fn default_option_kind() -> Kind {
    Kind::String
}

/// A completion node declaration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NodeDecl {
    /// Bare sub-command name
    Simple(String),

    /// Node with an explicit kind
    Complex(NodeDetail),
}

/// Completion node with an explicit kind
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeDetail {
    pub kind: NodeKind,

    /// Literal token, directory or label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Static candidates for options and custom nodes
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_or_list"
    )]
    pub entries: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDecl>,
}

/// Custom deserializer accepting a single string or a list of strings
fn deserialize_string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                _ => Err(D::Error::custom("list items must be strings")),
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or a list of strings")),
    }
}
