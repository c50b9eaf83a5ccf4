//! Schema validation and construction of the runtime objects

use crate::complete::{CompletionNode, NodeKind};
use crate::config::types::{NodeDecl, NodeDetail, OptionDecl, Schema};
use crate::error::{ConfigError, ConfigResult, OptionResult};
use crate::option::{Opt, OptionSet, Value};
use regex::Regex;

/// Short (`-x`) or long (`--word`) flag spelling
const ALIAS_PATTERN: &str = r"^(-[A-Za-z0-9?]|--[A-Za-z0-9][A-Za-z0-9_-]*)$";

/// Validate a complete schema
pub fn validate_schema(schema: &Schema) -> ConfigResult<()> {
    let alias_re = Regex::new(ALIAS_PATTERN).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    for decl in &schema.options {
        validate_option_decl(decl, &alias_re)?;
    }

    // Duplicates, defaults and argument counts
    build_option_set(schema)?;

    for node in &schema.completion {
        validate_node(node)?;
    }

    Ok(())
}

fn validate_option_decl(decl: &OptionDecl, alias_re: &Regex) -> ConfigResult<()> {
    if !alias_re.is_match(&format!("--{}", decl.name)) {
        return Err(ConfigError::Invalid(format!(
            "Invalid option name: `{}`",
            decl.name
        )));
    }
    for alias in &decl.aliases {
        if !alias_re.is_match(alias) {
            return Err(ConfigError::InvalidAlias {
                name: decl.name.clone(),
                alias: alias.clone(),
            });
        }
    }
    Ok(())
}

fn validate_node(node: &NodeDecl) -> ConfigResult<()> {
    let NodeDecl::Complex(detail) = node else {
        return Ok(());
    };

    let needs_name = matches!(detail.kind, NodeKind::String | NodeKind::FileList);
    if needs_name && detail.name.as_deref().map_or(true, str::is_empty) {
        return Err(ConfigError::MissingNodeName(detail.kind.to_string()));
    }

    let takes_entries = matches!(
        detail.kind,
        NodeKind::Options | NodeKind::OptionsWithCompletion | NodeKind::Custom
    );
    if !takes_entries && !detail.entries.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "Completion node of kind `{}` cannot have entries",
            detail.kind
        )));
    }

    detail.children.iter().try_for_each(validate_node)
}

/// Build one option from its declaration
pub fn build_option(decl: &OptionDecl) -> OptionResult<Opt> {
    let mut opt = Opt::new(decl.name.clone(), decl.kind)
        .aliases(decl.aliases.iter().cloned())
        .required(decl.required)
        .lowercase_keys(decl.lowercase_keys);

    if let Some(help) = &decl.help {
        opt = opt.help(help.clone());
    }
    if let Some(message) = &decl.required_error {
        opt = opt.required_error(message.clone());
    }
    if let Some(min) = decl.min_args {
        opt = opt.min_args(min);
    }
    if let Some(max) = decl.max_args {
        opt = opt.max_args(max);
    }
    if let Some(default) = &decl.default {
        let value = Value::parse_default(decl.kind, &decl.name, default)?;
        opt = opt.default_value(value).default_text(default.clone());
    }

    opt.validate()?;
    Ok(opt)
}

/// Build the option set in declaration order
pub fn build_option_set(schema: &Schema) -> ConfigResult<OptionSet> {
    let mut set = OptionSet::new();
    for decl in &schema.options {
        set.add(build_option(decl)?)?;
    }
    Ok(set)
}

/// Build the completion tree. Declared options are offered at the top level.
pub fn build_completion_tree(schema: &Schema) -> ConfigResult<CompletionNode> {
    let mut root = CompletionNode::root().named(schema.name.clone().unwrap_or_default());
    for decl in &schema.completion {
        root.add_child(build_node(decl)?);
    }

    let options = build_option_set(schema)?;
    if !options.is_empty() {
        root.add_child(options.completion_node());
    }

    Ok(root)
}

fn build_node(decl: &NodeDecl) -> ConfigResult<CompletionNode> {
    let detail = match decl {
        NodeDecl::Simple(name) => return Ok(CompletionNode::string(name.clone())),
        NodeDecl::Complex(detail) => detail,
    };

    let mut node = node_for(detail)?;
    for child in &detail.children {
        node.add_child(build_node(child)?);
    }
    Ok(node)
}

fn node_for(detail: &NodeDetail) -> ConfigResult<CompletionNode> {
    let name = detail.name.clone().unwrap_or_default();
    let entries = detail.entries.iter().cloned();

    let node = match detail.kind {
        NodeKind::String | NodeKind::FileList if name.is_empty() => {
            return Err(ConfigError::MissingNodeName(detail.kind.to_string()));
        }
        NodeKind::String => CompletionNode::string(name),
        NodeKind::FileList => CompletionNode::file_list(name),
        NodeKind::Root => CompletionNode::root().named(name),
        NodeKind::Options => CompletionNode::options(entries).named(name),
        NodeKind::OptionsWithCompletion => {
            CompletionNode::options_with_completion(entries).named(name)
        }
        NodeKind::Custom => CompletionNode::custom(entries).named(name),
    };
    Ok(node)
}
