use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::WalkerConfig;
use crate::ConfigureError;

/// Discriminates what the walker found at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A directory or regular file reached during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Recursive directory walker with a name-based exclusion set.
///
/// An entry whose file name exactly matches an excluded name is skipped at
/// any depth below the root; excluded directories are not descended into.
/// Symbolic links are only followed when `follow_links` is set; otherwise
/// they are skipped along with sockets, FIFOs and device files.
#[derive(Debug, Clone)]
pub struct Walker {
    exclude: BTreeSet<String>,
    follow_links: bool,
}

impl Walker {
    pub fn new<I, S>(exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: exclude.into_iter().map(Into::into).collect(),
            follow_links: false,
        }
    }

    pub fn from_config(config: &WalkerConfig) -> Self {
        Self::new(config.exclude.iter().cloned()).follow_links(config.follow_links)
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Add one more excluded entry name
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.insert(name.into());
        self
    }

    pub fn is_excluded(&self, name: &OsStr) -> bool {
        name.to_str()
            .map(|name| self.exclude.contains(name))
            .unwrap_or(false)
    }

    pub fn excluded_names(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(String::as_str)
    }

    /// Walk `root` and return every directory and regular file below it,
    /// sorted by path. The root itself is not part of the result.
    ///
    /// Any unreadable directory fails the whole walk.
    pub fn walk(&self, root: &Path) -> crate::Result<Vec<FileEntry>> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|source| ConfigureError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source,
            })?;

            if entry.depth() == 0 {
                continue;
            }

            match classify(&entry) {
                Some(kind) => entries.push(FileEntry {
                    path: entry.into_path(),
                    kind,
                }),
                None => debug!("Skipping special entry {}", entry.path().display()),
            }
        }

        // Sort for consistent ordering
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Walk `root` and return only the regular files
    pub fn files(&self, root: &Path) -> crate::Result<Vec<PathBuf>> {
        Ok(self
            .walk(root)?
            .into_iter()
            .filter(FileEntry::is_file)
            .map(|entry| entry.path)
            .collect())
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::from_config(&WalkerConfig::default())
    }
}

fn classify(entry: &DirEntry) -> Option<EntryKind> {
    // With follow_links set, walkdir reports the target's type here
    let file_type = entry.file_type();
    if file_type.is_dir() {
        Some(EntryKind::Directory)
    } else if file_type.is_file() {
        Some(EntryKind::File)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn relative_names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let walker = Walker::default();

        let result = walker.walk(temp_dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_files_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let walker = Walker::default();

        create_file(temp_dir.path(), "README.md", "# <PROJECT_NAME>");
        create_file(temp_dir.path(), "src/main.cpp", "int main() {}");
        create_file(temp_dir.path(), "src/utils/utils.hpp", "#pragma once");

        let files = walker.files(temp_dir.path()).unwrap();
        assert_eq!(
            relative_names(temp_dir.path(), &files),
            vec!["README.md", "src/main.cpp", "src/utils/utils.hpp"]
        );
    }

    #[test]
    fn test_walk_reports_directories_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let walker = Walker::default();

        create_file(temp_dir.path(), "src/lib.rs", "");

        let entries = walker.walk(temp_dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert!(entries[1].is_file());
    }

    #[test]
    fn test_default_exclusions_skip_git_and_build() {
        let temp_dir = TempDir::new().unwrap();
        let walker = Walker::default();

        create_file(temp_dir.path(), "a.txt", "__PROJID__");
        create_file(temp_dir.path(), ".git/config", "__PROJID__");
        create_file(temp_dir.path(), "build/b.txt", "__PROJID__");
        create_file(temp_dir.path(), "nested/build/c.txt", "__PROJID__");
        create_file(temp_dir.path(), "nested/d.txt", "__PROJID__");

        let files = walker.files(temp_dir.path()).unwrap();
        assert_eq!(
            relative_names(temp_dir.path(), &files),
            vec!["a.txt", "nested/d.txt"]
        );
    }

    #[test]
    fn test_exclusion_matches_files_by_exact_name() {
        let temp_dir = TempDir::new().unwrap();
        let walker = Walker::default().exclude("configure-project");

        create_file(temp_dir.path(), "configure-project", "binary");
        create_file(temp_dir.path(), "configure-project.md", "docs");
        create_file(temp_dir.path(), "builder.txt", "not excluded");

        let files = walker.files(temp_dir.path()).unwrap();
        assert_eq!(
            relative_names(temp_dir.path(), &files),
            vec!["builder.txt", "configure-project.md"]
        );
    }

    #[test]
    fn test_root_named_like_exclusion_is_still_walked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("build");
        create_file(&root, "inside.txt", "");

        let files = Walker::default().files(&root).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_root_is_a_walk_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = Walker::default().walk(&missing);
        assert!(matches!(result, Err(ConfigureError::Walk { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_fails_the_walk() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.txt", "__PROJID__");
        let locked = temp_dir.path().join("locked");
        create_file(&locked, "inner.txt", "__PROJID__");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory
        let readable = fs::read_dir(&locked).is_ok();
        let result = Walker::default().walk(temp_dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        match result {
            Err(ConfigureError::Walk { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected a walk error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped_unless_followed() {
        let temp_dir = TempDir::new().unwrap();
        let target = create_file(temp_dir.path(), "real/target.txt", "<PROJECT_NAME>");
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.txt")).unwrap();

        let files = Walker::default().files(temp_dir.path()).unwrap();
        assert_eq!(
            relative_names(temp_dir.path(), &files),
            vec!["real/target.txt"]
        );

        let followed = Walker::default()
            .follow_links(true)
            .files(temp_dir.path())
            .unwrap();
        assert_eq!(
            relative_names(temp_dir.path(), &followed),
            vec!["link.txt", "real/target.txt"]
        );
    }

    #[test]
    fn test_from_config_uses_configured_names() {
        let config = WalkerConfig {
            exclude: vec!["node_modules".to_string()],
            follow_links: false,
        };
        let walker = Walker::from_config(&config);

        assert!(walker.is_excluded(OsStr::new("node_modules")));
        assert!(!walker.is_excluded(OsStr::new(".git")));
        assert_eq!(walker.excluded_names().collect::<Vec<_>>(), vec!["node_modules"]);
    }
}
