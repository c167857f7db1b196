use super::{DirEntry, DocumentStore};
use crate::error::{EditorError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory store for tests. Directories exist implicitly as ancestors of stored files,
/// or explicitly through [`InMemoryStore::add_dir`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    fail_writes: bool,
    failing_paths: BTreeSet<PathBuf>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: &str) -> Self {
        self.files.insert(path.into(), text.to_string());
        self
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        self.dirs.insert(path.into());
    }

    /// Makes every subsequent write fail, for exercising error paths.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes writes to `path` fail while other paths keep working.
    pub fn fail_writes_to(&mut self, path: impl Into<PathBuf>) {
        self.failing_paths.insert(path.into());
    }

    pub fn text(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    fn known_dirs(&self) -> BTreeSet<&Path> {
        let mut dirs: BTreeSet<&Path> = self.dirs.iter().map(PathBuf::as_path).collect();
        for path in self.files.keys().chain(self.dirs.iter()) {
            dirs.extend(path.ancestors().skip(1));
        }
        dirs
    }
}

impl DocumentStore for InMemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.known_dirs().contains(path)
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        if self.fail_writes || self.failing_paths.contains(path) {
            return Err(EditorError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("simulated write failure: {}", path.display()),
            )));
        }
        self.files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !self.is_dir(path) {
            return Err(EditorError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )));
        }
        let dirs = self.known_dirs();
        let mut entries = Vec::new();
        for child in dirs.iter().filter(|d| d.parent() == Some(path)) {
            if let Some(name) = child.file_name() {
                entries.push(DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_dir: true,
                    is_symlink: false,
                });
            }
        }
        for file in self.files.keys().filter(|f| f.parent() == Some(path)) {
            if let Some(name) = file.file_name() {
                entries.push(DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_dir: false,
                    is_symlink: false,
                });
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_lines() {
        let mut store = InMemoryStore::new();
        let path = Path::new("/docs/a.txt");
        store
            .write_lines(path, &["x".to_string(), "y".to_string()])
            .unwrap();
        assert_eq!(store.text(path), Some("x\ny\n"));
        assert_eq!(
            store.read_lines(path).unwrap(),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn ancestors_of_files_are_directories() {
        let store = InMemoryStore::new().with_file("/root/sub/a.txt", "");
        assert!(store.is_dir(Path::new("/root")));
        assert!(store.is_dir(Path::new("/root/sub")));
        assert!(!store.is_dir(Path::new("/root/sub/a.txt")));

        let entries = store.list_dir(Path::new("/root")).unwrap();
        assert_eq!(
            entries,
            vec![DirEntry {
                name: "sub".into(),
                is_dir: true,
                is_symlink: false,
            }]
        );
    }

    #[test]
    fn failing_writes_leave_content() {
        let mut store = InMemoryStore::new().with_file("/a.txt", "keep\n");
        store.set_fail_writes(true);
        assert!(store.write_text(Path::new("/a.txt"), "lost").is_err());
        assert_eq!(store.text(Path::new("/a.txt")), Some("keep\n"));
    }

    #[test]
    fn failures_can_target_one_path() {
        let mut store = InMemoryStore::new();
        store.fail_writes_to("/bad.txt");
        assert!(store.write_text(Path::new("/bad.txt"), "x").is_err());
        assert!(store.write_text(Path::new("/good.txt"), "x").is_ok());
        assert!(store.text(Path::new("/bad.txt")).is_none());
    }
}
