//! Find the source files making up a single package directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TraceError};
use crate::language::Language;

/// Lists the non-test source files directly inside `dir`, sorted by name
///
/// Subdirectories are never entered: a package is exactly one directory.
/// Sorting makes "first file that declares the function" deterministic
/// regardless of the order the filesystem lists entries in.
pub fn package_files(dir: &Path, language: impl Language) -> Result<Vec<PathBuf>> {
    let directory_error = |source| TraceError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir).map_err(directory_error)?;
    let file_regex = language.file_regex();

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(directory_error)?.path();

        if path.is_dir() {
            continue;
        }

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str())
            && file_regex.is_match(file_name)
            && !language.is_test_file(file_name)
        {
            files.push(path);
        }
    }

    files.sort();

    tracing::debug!(
        "Found {} {} file(s) in {}",
        files.len(),
        language,
        dir.display()
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GoLang;
    use tempfile::TempDir;

    #[test]
    fn test_package_files() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path();

        // Create test directory structure
        fs::create_dir_all(temp_path.join("sub"))?;
        fs::create_dir_all(temp_path.join("dir.go"))?; // Directory named like a source file

        fs::write(temp_path.join("zeta.go"), "package pkg")?;
        fs::write(temp_path.join("alpha.go"), "package pkg")?;
        fs::write(temp_path.join("alpha_test.go"), "package pkg")?; // Test-only
        fs::write(temp_path.join("sub/nested.go"), "package sub")?; // Not first-level
        fs::write(temp_path.join("README.md"), "# Package")?;

        let files = package_files(temp_path, GoLang)?;

        let filenames: Vec<&str> = files
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|n| n.to_str())
            .collect();
        assert_eq!(filenames, vec!["alpha.go", "zeta.go"]);

        Ok(())
    }

    #[test]
    fn test_missing_directory() {
        let err = package_files(Path::new("/nonexistent/pkg"), GoLang).unwrap_err();
        assert!(matches!(err, TraceError::Directory { .. }));
    }
}
