//! Directory listing for file completions

use crate::complete::order::sort_for_completion;
use crate::error::DirectoryReadError;
use std::fs;
use std::path::Path;
use tracing::trace;

/// List the entries of `dir` whose names start with `prefix`.
///
/// Directories get a trailing `/`. The result is in completion order, never
/// in whatever order the OS returned.
pub fn list_dir(dir: impl AsRef<Path>, prefix: &str) -> Result<Vec<String>, DirectoryReadError> {
    let dir = dir.as_ref();
    let read_err = |source| DirectoryReadError {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                trace!(name = ?raw, "skipping entry with a non UTF-8 name");
                continue;
            }
        };
        if !name.starts_with(prefix) {
            continue;
        }
        // Follow symlinks so a link to a directory completes like one
        let is_dir = fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);
        names.push(if is_dir { format!("{}/", name) } else { name });
    }

    sort_for_completion(&mut names);
    trace!(dir = %dir.display(), prefix, count = names.len(), "listed directory");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.txt", "a.txt", ".a.txt", "notes.md"] {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(temp_dir.path().join("assets")).unwrap();
        temp_dir
    }

    #[test]
    fn test_list_all_sorted_with_dir_suffix() {
        let temp_dir = fixture();
        let names = list_dir(temp_dir.path(), "").unwrap();
        assert_eq!(names, vec!["a.txt", ".a.txt", "assets/", "b.txt", "notes.md"]);
    }

    #[test]
    fn test_list_filters_by_raw_prefix() {
        let temp_dir = fixture();
        assert_eq!(list_dir(temp_dir.path(), "a").unwrap(), vec!["a.txt", "assets/"]);
        assert_eq!(list_dir(temp_dir.path(), ".").unwrap(), vec![".a.txt"]);
        assert!(list_dir(temp_dir.path(), "zzz").unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = list_dir(temp_dir.path().join("nope"), "").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), err.source.to_string());
    }

    #[cfg(unix)]
    #[test]
    fn test_plain_file_is_not_a_directory() {
        let temp_dir = fixture();
        let err = list_dir(temp_dir.path().join("a.txt"), "").unwrap_err();
        // ENOTDIR
        assert_eq!(err.source.raw_os_error(), Some(20));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = fixture();
        fs::write(temp_dir.path().join(OsStr::from_bytes(b"a\xffbad")), "x").unwrap();
        assert_eq!(list_dir(temp_dir.path(), "a").unwrap(), vec!["a.txt", "assets/"]);
    }
}
