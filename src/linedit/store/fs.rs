use super::{DirEntry, DocumentStore};
use crate::error::{EditorError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(EditorError::Io)?;
            }
        }
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EditorError::Io(e)),
        }
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.ensure_parent(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_path = path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_path, text).map_err(EditorError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(EditorError::Io(e));
        }
        debug!(path = %path.display(), bytes = text.len(), "wrote file");
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(EditorError::Io)? {
            let entry = entry.map_err(EditorError::Io)?;
            let file_type = entry.file_type().map_err(EditorError::Io)?;
            let is_symlink = file_type.is_symlink();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: if is_symlink {
                    entry.path().is_dir()
                } else {
                    file_type.is_dir()
                },
                is_symlink,
            });
        }
        Ok(entries)
    }
}
