//! Error types for optree

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for optree operations
pub type Result<T> = std::result::Result<T, OptreeError>;

/// Main error type for optree
#[derive(Error, Debug)]
pub enum OptreeError {
    /// Option declaration and value errors
    #[error("{0}")]
    Option(#[from] OptionError),

    /// Schema file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Directory listing failed during completion
    #[error("{0}")]
    Directory(#[from] DirectoryReadError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// What a raw token failed to convert into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    ToInt,
    ToFloat,
    NotKeyValue,
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionKind::ToInt => f.write_str("an integer"),
            ConversionKind::ToFloat => f.write_str("a float"),
            ConversionKind::NotKeyValue => f.write_str("a key=value pair"),
        }
    }
}

/// A raw token that could not be converted for an option
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value `{raw}` for `{alias}`: expected {kind}")]
pub struct ConversionError {
    pub kind: ConversionKind,
    /// The alias the option was invoked with
    pub alias: String,
    /// The offending token
    pub raw: String,
}

impl ConversionError {
    pub fn new(kind: ConversionKind, alias: &str, raw: &str) -> Self {
        ConversionError {
            kind,
            alias: alias.to_string(),
            raw: raw.to_string(),
        }
    }
}

/// Option declaration, parsing and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{message}")]
    MissingRequiredOption { name: String, message: String },

    #[error("`{alias}` takes at most {max} value(s), got {got}")]
    TooManyArgs { alias: String, max: usize, got: usize },

    #[error("`{alias}` expects at least {min} value(s)")]
    MissingValue { alias: String, min: usize },

    #[error("unexpected flag: `{0}`")]
    UnknownOption(String),

    #[error("option name or alias `{0}` is declared more than once")]
    DuplicateOption(String),

    #[error("option `{name}` has an invalid argument count policy (min {min}, max {max})")]
    ArgCountPolicy { name: String, min: usize, max: usize },

    #[error("default `{default}` for option `{name}`: {error}")]
    InvalidDefault {
        name: String,
        default: String,
        error: String,
    },
}

/// Schema file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find schema file (searched: {0})")]
    NotFound(String),

    #[error("Invalid schema: {0}")]
    Invalid(String),

    #[error("Invalid alias `{alias}` for option `{name}`")]
    InvalidAlias { name: String, alias: String },

    #[error("Completion node of kind `{0}` needs a name")]
    MissingNodeName(String),

    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Directory listing failure. The message is the OS error text.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct DirectoryReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DirectoryReadError {
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// Specialized result type for option operations
pub type OptionResult<T> = std::result::Result<T, OptionError>;

/// Specialized result type for schema operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_message() {
        let err = ConversionError::new(ConversionKind::ToInt, "-n", "abc");
        assert_eq!(
            err.to_string(),
            "invalid value `abc` for `-n`: expected an integer"
        );
    }

    #[test]
    fn test_conversion_wraps_into_option_error() {
        let err: OptionError = ConversionError::new(ConversionKind::NotKeyValue, "--set", "x").into();
        assert!(matches!(err, OptionError::Conversion(_)));
        assert!(err.to_string().contains("key=value"));
    }

    #[test]
    fn test_directory_error_is_verbatim() {
        let source = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let err = DirectoryReadError {
            path: PathBuf::from("/nope"),
            source,
        };
        assert_eq!(err.to_string(), "No such file or directory");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
