//! Schema file parsing and discovery

use crate::config::types::Schema;
use crate::error::{ConfigError, ConfigResult, OptreeError};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Schema file names to search for
const SCHEMA_FILE_NAMES: &[&str] = &["optree.yml", "optree.yaml"];

/// Find the schema file in the current directory, its parents, then the
/// per-user config directory
pub fn find_schema_file() -> ConfigResult<PathBuf> {
    let current_dir = env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?;

    match find_schema_file_from(current_dir) {
        Ok(path) => Ok(path),
        Err(ConfigError::NotFound(searched)) => {
            let Some(dirs) = ProjectDirs::from("", "", "optree") else {
                return Err(ConfigError::NotFound(searched));
            };
            let mut searched = vec![searched];
            for file_name in SCHEMA_FILE_NAMES {
                let schema_path = dirs.config_dir().join(file_name);
                searched.push(schema_path.display().to_string());
                if schema_path.is_file() {
                    return Ok(schema_path);
                }
            }
            Err(ConfigError::NotFound(searched.join(", ")))
        }
        Err(e) => Err(e),
    }
}

/// Find the schema file starting from a specific directory
pub fn find_schema_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in SCHEMA_FILE_NAMES {
            let schema_path = current_dir.join(file_name);
            searched_paths.push(schema_path.display().to_string());

            if schema_path.is_file() {
                debug!(path = %schema_path.display(), "found schema file");
                return Ok(schema_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a schema file from a path
pub fn parse_schema_file(path: &Path) -> Result<Schema, OptreeError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_schema(&contents)
}

/// Parse a schema from a string
pub fn parse_schema(yaml: &str) -> Result<Schema, OptreeError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse the schema with automatic file discovery
pub fn parse_schema_auto() -> Result<(Schema, PathBuf), OptreeError> {
    let schema_path = find_schema_file()?;
    let schema = parse_schema_file(&schema_path)?;
    Ok((schema, schema_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE: &str = r#"
name: exe
completion:
  - run
"#;

    #[test]
    fn test_parse_simple_schema() {
        let schema = parse_schema(SIMPLE).unwrap();
        assert_eq!(schema.name, Some("exe".to_string()));
        assert_eq!(schema.completion.len(), 1);
    }

    #[test]
    fn test_find_schema_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        let schema_path = temp_dir.path().join("optree.yml");
        fs::write(&schema_path, SIMPLE).unwrap();

        let found = find_schema_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, schema_path);
    }

    #[test]
    fn test_find_schema_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let schema_path = temp_dir.path().join("optree.yaml");
        let sub_dir = temp_dir.path().join("a").join("b");

        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(&schema_path, SIMPLE).unwrap();

        let found = find_schema_file_from(sub_dir).unwrap();
        assert_eq!(found, schema_path);
    }

    #[test]
    fn test_schema_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = find_schema_file_from(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_schema_file_reports_yaml_errors() {
        let temp_dir = TempDir::new().unwrap();
        let schema_path = temp_dir.path().join("optree.yml");
        fs::write(&schema_path, "options: {not: [a list").unwrap();

        let result = parse_schema_file(&schema_path);
        assert!(matches!(result, Err(OptreeError::Yaml(_))));
    }
}
