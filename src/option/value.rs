//! Option kinds and the typed value slot they fill

use crate::error::{ConversionError, ConversionKind, OptionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of an option. Fixed once the option is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    #[serde(alias = "boolean")]
    Bool,
    String,
    #[serde(alias = "integer")]
    Int,
    Float,
    #[serde(rename = "string-list")]
    StringRepeated,
    #[serde(rename = "int-list")]
    IntRepeated,
    #[serde(rename = "float-list")]
    FloatRepeated,
    StringMap,
}

impl Kind {
    /// Repeated and map kinds accumulate values across occurrences
    pub fn is_repeated(self) -> bool {
        matches!(
            self,
            Kind::StringRepeated | Kind::IntRepeated | Kind::FloatRepeated | Kind::StringMap
        )
    }

    /// Name used in schema files and listings
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::StringRepeated => "string-list",
            Kind::IntRepeated => "int-list",
            Kind::FloatRepeated => "float-list",
            Kind::StringMap => "string-map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storage slot of an option, one variant per kind
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Float(f64),
    StringList(Vec<String>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    StringMap(BTreeMap<String, String>),
}

impl Value {
    /// Zero value for a kind
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Value::Bool(false),
            Kind::String => Value::String(String::new()),
            Kind::Int => Value::Int(0),
            Kind::Float => Value::Float(0.0),
            Kind::StringRepeated => Value::StringList(Vec::new()),
            Kind::IntRepeated => Value::IntList(Vec::new()),
            Kind::FloatRepeated => Value::FloatList(Vec::new()),
            Kind::StringMap => Value::StringMap(BTreeMap::new()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::StringList(_) => Kind::StringRepeated,
            Value::IntList(_) => Kind::IntRepeated,
            Value::FloatList(_) => Kind::FloatRepeated,
            Value::StringMap(_) => Kind::StringMap,
        }
    }

    /// Convert a schema default string into a value of `kind`.
    ///
    /// List kinds take a comma separated default, maps take `k=v` pairs
    /// separated by commas.
    pub fn parse_default(kind: Kind, name: &str, text: &str) -> Result<Self, OptionError> {
        let invalid = |error: String| OptionError::InvalidDefault {
            name: name.to_string(),
            default: text.to_string(),
            error,
        };
        match kind {
            Kind::Bool => match text {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid("expected `true` or `false`".to_string())),
            },
            _ => Self::convert_default(kind, name, text).map_err(|e| invalid(e.to_string())),
        }
    }

    fn convert_default(kind: Kind, name: &str, text: &str) -> Result<Self, ConversionError> {
        let items = || text.split(',').map(str::trim).filter(|s| !s.is_empty());
        let value = match kind {
            Kind::Bool => Value::Bool(text == "true"),
            Kind::String => Value::String(text.to_string()),
            Kind::Int => Value::Int(parse_int(name, text)?),
            Kind::Float => Value::Float(parse_float(name, text)?),
            Kind::StringRepeated => Value::StringList(items().map(String::from).collect()),
            Kind::IntRepeated => Value::IntList(
                items()
                    .map(|s| parse_int(name, s))
                    .collect::<Result<_, _>>()?,
            ),
            Kind::FloatRepeated => Value::FloatList(
                items()
                    .map(|s| parse_float(name, s))
                    .collect::<Result<_, _>>()?,
            ),
            Kind::StringMap => {
                let mut map = BTreeMap::new();
                for item in items() {
                    let (key, value) = split_key_value(name, item)?;
                    map.insert(key.to_string(), value.to_string());
                }
                Value::StringMap(map)
            }
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::StringList(list) => f.write_str(&list.join(",")),
            Value::IntList(list) => write_joined(f, list),
            Value::FloatList(list) => write_joined(f, list),
            Value::StringMap(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                f.write_str(&pairs.join(","))
            }
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, list: &[T]) -> fmt::Result {
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Base-10 integer conversion
pub(crate) fn parse_int(alias: &str, raw: &str) -> Result<i64, ConversionError> {
    raw.parse::<i64>()
        .map_err(|_| ConversionError::new(ConversionKind::ToInt, alias, raw))
}

pub(crate) fn parse_float(alias: &str, raw: &str) -> Result<f64, ConversionError> {
    raw.parse::<f64>()
        .map_err(|_| ConversionError::new(ConversionKind::ToFloat, alias, raw))
}

/// Split `key=value` on the first `=`. Both halves must be non-empty.
pub(crate) fn split_key_value<'a>(
    alias: &str,
    raw: &'a str,
) -> Result<(&'a str, &'a str), ConversionError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => Ok((key, value)),
        _ => Err(ConversionError::new(ConversionKind::NotKeyValue, alias, raw)),
    }
}

/// Largest number of integers one `A..B` token may expand to
pub const MAX_RANGE_LEN: u64 = 1 << 16;

/// Expand one int-list token: `A..B` (inclusive, `A < B`) or a single integer.
///
/// Ranges longer than [`MAX_RANGE_LEN`] are rejected before anything is allocated.
pub(crate) fn expand_int_token(alias: &str, raw: &str) -> Result<Vec<i64>, ConversionError> {
    let Some((start, end)) = raw.split_once("..") else {
        return Ok(vec![parse_int(alias, raw)?]);
    };

    let range_err = || ConversionError::new(ConversionKind::ToInt, alias, raw);
    let start = start.parse::<i64>().map_err(|_| range_err())?;
    let end = end.parse::<i64>().map_err(|_| range_err())?;
    if start >= end {
        return Err(range_err());
    }
    match end.checked_sub(start) {
        Some(span) if (span as u64) < MAX_RANGE_LEN => Ok((start..=end).collect()),
        _ => Err(range_err()),
    }
}
