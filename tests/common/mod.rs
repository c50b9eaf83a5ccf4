//! Common test utilities
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory with an optree.yml file
pub fn create_test_schema(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("optree.yml");
    fs::write(&schema_path, content).unwrap();
    (temp_dir, schema_path)
}

/// Create the `testdir` fixture used by file completion tests
pub fn create_file_fixture(root: &Path) -> PathBuf {
    let dir = root.join("testdir");
    fs::create_dir(&dir).unwrap();
    for name in ["aFile1", "aFile2", ".aFile2"] {
        fs::write(dir.join(name), "").unwrap();
    }
    dir
}
