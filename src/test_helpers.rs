//! Test helpers for creating hermetic template trees
//!
//! This module provides utilities for building throwaway project templates in
//! temporary directories, so the walker and the substitution pass can be
//! exercised without touching a real checkout.
//!
//! # Usage
//!
//! ```rust,ignore
//! use configure_project::test_helpers::TemplateProject;
//!
//! let project = TemplateProject::with_standard_layout().unwrap();
//! let before = project.snapshot().unwrap();
//! // run the configuration against project.root() ...
//! # let _ = before;
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::{ConfigureError, Result};

/// Template tree rooted in a temporary directory
///
/// The directory is removed when the value is dropped.
pub struct TemplateProject {
    temp_dir: TempDir,
    project_root: PathBuf,
}

impl TemplateProject {
    /// Create a new empty template in a temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().to_path_buf();

        Ok(Self {
            temp_dir,
            project_root,
        })
    }

    /// Create a template shaped like a typical project skeleton
    ///
    /// Structure created:
    /// - `README.md` and `CMakeLists.txt` with both placeholders
    /// - `src/main.cpp` with the project name placeholder
    /// - `src/utils.hpp` without placeholders
    /// - `.git/config` and `build/cache.txt`, which must never be rewritten
    pub fn with_standard_layout() -> Result<Self> {
        let project = Self::new()?;

        project.add_file("README.md", "# <PROJECT_NAME>\n\nProject id: __PROJID__\n")?;
        project.add_file(
            "CMakeLists.txt",
            "project(<PROJECT_NAME>)\nadd_definitions(-DPROJECT_ID=__PROJID__)\n",
        )?;
        project.add_file(
            "src/main.cpp",
            "int main() { std::cout << \"<PROJECT_NAME>\" << std::endl; }\n",
        )?;
        project.add_file("src/utils.hpp", "#pragma once\n")?;
        project.add_file(".git/config", "[core]\n\tname = <PROJECT_NAME>\n")?;
        project.add_file("build/cache.txt", "__PROJID__\n")?;

        Ok(project)
    }

    /// Add a text file at a path relative to the project root
    ///
    /// Parent directories are created as needed. Returns the absolute path.
    pub fn add_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        self.add_bytes(relative_path, content.as_bytes())
    }

    /// Add a file with arbitrary (possibly non-UTF-8) content
    pub fn add_bytes(&self, relative_path: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.project_root.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&file_path, content).map_err(|source| ConfigureError::Write {
            path: file_path.clone(),
            source,
        })?;

        Ok(file_path)
    }

    /// Read a file back as text
    pub fn read(&self, relative_path: &str) -> Result<String> {
        let path = self.path(relative_path);
        fs::read_to_string(&path).map_err(|source| ConfigureError::Read { path, source })
    }

    /// Capture the bytes of every file under the root, keyed by relative path
    ///
    /// Walks everything, including `.git` and `build`, so two snapshots can
    /// prove that nothing at all was modified.
    pub fn snapshot(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut files = BTreeMap::new();
        for entry in walkdir::WalkDir::new(&self.project_root) {
            let entry = entry.map_err(|source| ConfigureError::Walk {
                path: self.project_root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.project_root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            files.insert(relative, fs::read(entry.path())?);
        }
        Ok(files)
    }

    /// Get the path to the project root directory
    pub fn root(&self) -> &Path {
        &self.project_root
    }

    /// Get a path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Get the temporary directory (for advanced usage)
    ///
    /// Most tests should use `root()` instead.
    pub fn temp_dir(&self) -> &TempDir {
        &self.temp_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_contents() {
        let project = TemplateProject::with_standard_layout().unwrap();
        let snapshot = project.snapshot().unwrap();

        assert_eq!(snapshot.len(), 6);
        assert!(snapshot.contains_key(".git/config"));
        assert!(snapshot.contains_key("build/cache.txt"));
        assert_eq!(project.read("src/utils.hpp").unwrap(), "#pragma once\n");
    }

    #[test]
    fn test_add_bytes_keeps_raw_content() {
        let project = TemplateProject::new().unwrap();
        let path = project.add_bytes("assets/logo.png", &[0x89, 0xff]).unwrap();

        assert_eq!(fs::read(path).unwrap(), vec![0x89, 0xff]);
        assert!(project.temp_dir().path().exists());
    }
}
