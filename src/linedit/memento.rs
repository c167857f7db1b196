//! Workspace snapshot: which documents were open, their dirty and logging flags, and the
//! active path. Content is never included; documents are re-read from disk on restore.

use crate::error::{EditorError, Result};
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileState {
    pub path: PathBuf,
    pub modified: bool,
    pub logging: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceMemento {
    pub files: Vec<FileState>,
    #[serde(default)]
    pub active: Option<PathBuf>,
}

impl WorkspaceMemento {
    pub fn save<S: DocumentStore>(&self, store: &mut S, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(EditorError::Serialization)?;
        store.write_text(path, &content)
    }

    /// `None` when no state file exists.
    pub fn load<S: DocumentStore>(store: &S, path: &Path) -> Result<Option<Self>> {
        match store.read_text(path)? {
            Some(content) => {
                let memento = serde_json::from_str(&content).map_err(EditorError::Serialization)?;
                Ok(Some(memento))
            }
            None => Ok(None),
        }
    }
}
