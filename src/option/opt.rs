//! A single declared option and the rules for saving raw tokens into it

use crate::error::{OptionError, OptionResult};
use crate::option::value::{expand_int_token, parse_float, parse_int, split_key_value};
use crate::option::{Kind, Value};
use std::collections::BTreeMap;
use tracing::trace;

/// A declared flag with a type, a value slot and an argument-count policy
#[derive(Debug, Clone, PartialEq)]
pub struct Opt {
    /// Canonical name, unique within an option set
    pub name: String,

    /// Alternate spellings (`-v`, `--verbose`); `name` itself is not included
    pub aliases: Vec<String>,

    /// Help text
    pub help: Option<String>,

    /// Default as shown in help output
    pub default_text: Option<String>,

    /// Whether the option must appear on the command line
    pub required: bool,

    /// Custom message for a missing required option
    pub required_error: Option<String>,

    /// Lower-case keys of a string map before storing them
    pub lowercase_keys: bool,

    kind: Kind,
    value: Value,
    default: Value,
    min_args: usize,
    max_args: usize,
    calls: usize,
    used_alias: Option<String>,
}

impl Opt {
    /// Create an option of `kind` holding the kind's zero value
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        let (min_args, max_args) = match kind {
            Kind::Bool => (0, 0),
            _ => (1, 1),
        };
        let value = Value::empty(kind);
        Opt {
            name: name.into(),
            aliases: Vec::new(),
            help: None,
            default_text: None,
            required: false,
            required_error: None,
            lowercase_keys: false,
            kind,
            default: value.clone(),
            value,
            min_args,
            max_args,
            calls: 0,
            used_alias: None,
        }
    }

    /// Boolean flag with a declared default
    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, Kind::Bool).default_value(Value::Bool(default))
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = Some(text.into());
        self
    }

    /// Set the initial value. Values of another kind are ignored.
    pub fn default_value(mut self, value: Value) -> Self {
        if value.kind() == self.kind {
            self.default = value.clone();
            self.value = value;
        }
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn required_error(mut self, message: impl Into<String>) -> Self {
        self.required_error = Some(message.into());
        self
    }

    pub fn min_args(mut self, min: usize) -> Self {
        self.min_args = min;
        self
    }

    pub fn max_args(mut self, max: usize) -> Self {
        self.max_args = max;
        self
    }

    pub fn lowercase_keys(mut self, lowercase: bool) -> Self {
        self.lowercase_keys = lowercase;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn min_arg_count(&self) -> usize {
        self.min_args
    }

    pub fn max_arg_count(&self) -> usize {
        self.max_args
    }

    /// Name followed by aliases, the spellings that resolve to this option
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether `spelling` resolves to this option. `--name` always does.
    pub fn matches(&self, spelling: &str) -> bool {
        self.spellings().any(|s| s == spelling)
            || spelling.strip_prefix("--") == Some(self.name.as_str())
    }

    /// Dash-prefixed spellings offered for completion
    pub fn flags(&self) -> Vec<String> {
        let mut flags: Vec<String> = self
            .aliases
            .iter()
            .filter(|a| a.starts_with('-'))
            .cloned()
            .collect();
        let long = format!("--{}", self.name);
        if !flags.contains(&long) {
            flags.push(long);
        }
        flags
    }

    /// Number of times the option was matched
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn called(&self) -> bool {
        self.calls > 0
    }

    /// Alias of the most recent occurrence
    pub fn used_alias(&self) -> Option<&str> {
        self.used_alias.as_deref()
    }

    /// Check the argument-count policy against the kind
    pub fn validate(&self) -> OptionResult<()> {
        let ok = match self.kind {
            Kind::Bool => self.min_args == 0 && self.max_args == 0,
            kind if kind.is_repeated() => self.min_args > 0 && self.max_args >= self.min_args,
            _ => self.min_args == 1 && self.max_args == 1,
        };
        if ok {
            Ok(())
        } else {
            Err(OptionError::ArgCountPolicy {
                name: self.name.clone(),
                min: self.min_args,
                max: self.max_args,
            })
        }
    }

    /// Save tokens as if the option was invoked by its canonical name
    pub fn save<S: AsRef<str>>(&mut self, tokens: &[S]) -> OptionResult<()> {
        let name = self.name.clone();
        self.save_as(&name, tokens)
    }

    /// Save the tokens of one occurrence invoked through `alias`.
    ///
    /// Conversion failures leave the stored value untouched.
    pub fn save_as<S: AsRef<str>>(&mut self, alias: &str, tokens: &[S]) -> OptionResult<()> {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        trace!(option = %self.name, alias, ?tokens, "saving option");

        self.calls += 1;
        self.used_alias = Some(alias.to_string());

        if !self.kind.is_repeated() && self.kind != Kind::Bool && tokens.len() > 1 {
            return Err(OptionError::TooManyArgs {
                alias: alias.to_string(),
                max: self.max_args,
                got: tokens.len(),
            });
        }

        match &mut self.value {
            Value::Bool(current) => match tokens.first() {
                Some(&"true") => *current = true,
                Some(&"false") => *current = false,
                _ => *current = !*current,
            },
            Value::String(current) => {
                if let Some(token) = tokens.first() {
                    *current = token.to_string();
                }
            }
            Value::Int(current) => {
                if let Some(token) = tokens.first() {
                    *current = parse_int(alias, token)?;
                }
            }
            Value::Float(current) => {
                if let Some(token) = tokens.first() {
                    *current = parse_float(alias, token)?;
                }
            }
            Value::StringList(list) => {
                list.extend(tokens.iter().map(|t| t.to_string()));
            }
            Value::IntList(list) => {
                let mut parsed = Vec::new();
                for token in &tokens {
                    parsed.extend(expand_int_token(alias, token)?);
                }
                list.extend(parsed);
            }
            Value::FloatList(list) => {
                let parsed = tokens
                    .iter()
                    .map(|t| parse_float(alias, t))
                    .collect::<Result<Vec<_>, _>>()?;
                list.extend(parsed);
            }
            Value::StringMap(map) => {
                let mut pairs = Vec::with_capacity(tokens.len());
                for token in &tokens {
                    let (key, value) = split_key_value(alias, token)?;
                    let key = if self.lowercase_keys {
                        key.to_lowercase()
                    } else {
                        key.to_string()
                    };
                    pairs.push((key, value.to_string()));
                }
                map.extend(pairs);
            }
        }

        Ok(())
    }

    /// Fail if the option is required and was never matched
    pub fn check_required(&self) -> OptionResult<()> {
        if !self.required || self.called() {
            return Ok(());
        }
        let message = self
            .required_error
            .clone()
            .unwrap_or_else(|| format!("option `--{}` is required", self.name));
        Err(OptionError::MissingRequiredOption {
            name: self.name.clone(),
            message,
        })
    }

    /// Restore the default value and forget provenance
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        self.calls = 0;
        self.used_alias = None;
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            Value::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match &self.value {
            Value::StringList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match &self.value {
            Value::IntList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match &self.value {
            Value::FloatList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match &self.value {
            Value::StringMap(map) => Some(map),
            _ => None,
        }
    }
}
