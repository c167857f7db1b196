//! # Workspace
//!
//! The set of open [`DocumentSession`]s, keyed by normalized absolute path, plus at most one
//! active path. The active path is only a lookup key: it always names a session present in
//! the map, and closing the active session leaves no document active.
//!
//! ## Path Normalization
//!
//! Keys are made absolute against the current directory and `.`/`..` components are folded
//! lexically. Symlinks are not resolved: documents are often opened before they exist on
//! disk, and canonicalizing would give the same file two keys depending on timing.

use crate::error::{EditorError, Result};
use crate::memento::{FileState, WorkspaceMemento};
use crate::observer::{FileLogger, DEFAULT_LOG_SUFFIX};
use crate::session::DocumentSession;
use std::collections::BTreeMap;
use std::env;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_err(EditorError::Io)?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

pub struct Workspace {
    sessions: BTreeMap<PathBuf, DocumentSession>,
    active: Option<PathBuf>,
    log_suffix: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_SUFFIX)
    }
}

impl Workspace {
    pub fn new(log_suffix: impl Into<String>) -> Self {
        Self {
            sessions: BTreeMap::new(),
            active: None,
            log_suffix: log_suffix.into(),
        }
    }

    /// Returns the session for `path`, creating an empty one if needed, and makes it active.
    /// Re-opening an open path returns the existing session untouched.
    pub fn open_or_create(&mut self, path: &Path) -> Result<&mut DocumentSession> {
        let key = normalize_path(path)?;
        if !self.sessions.contains_key(&key) {
            debug!(path = %key.display(), "opening session");
            self.sessions
                .insert(key.clone(), DocumentSession::new(key.clone()));
        }
        self.active = Some(key.clone());
        self.sessions
            .get_mut(&key)
            .ok_or_else(|| EditorError::NotOpen(key.clone()))
    }

    pub fn is_open(&self, path: &Path) -> bool {
        normalize_path(path)
            .map(|key| self.sessions.contains_key(&key))
            .unwrap_or(false)
    }

    pub fn get(&self, path: &Path) -> Option<&DocumentSession> {
        let key = normalize_path(path).ok()?;
        self.sessions.get(&key)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut DocumentSession> {
        let key = normalize_path(path).ok()?;
        self.sessions.get_mut(&key)
    }

    /// Returns `false` when `path` was not open.
    pub fn close(&mut self, path: &Path) -> bool {
        let Ok(key) = normalize_path(path) else {
            return false;
        };
        if self.sessions.remove(&key).is_none() {
            return false;
        }
        if self.active.as_deref() == Some(key.as_path()) {
            self.active = None;
        }
        debug!(path = %key.display(), "closed session");
        true
    }

    pub fn close_all(&mut self) {
        self.sessions.clear();
        self.active = None;
    }

    /// Returns `false` (and keeps the current active document) when `path` is not open.
    pub fn set_active(&mut self, path: &Path) -> bool {
        let Ok(key) = normalize_path(path) else {
            return false;
        };
        if !self.sessions.contains_key(&key) {
            return false;
        }
        self.active = Some(key);
        true
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&DocumentSession> {
        self.active.as_ref().and_then(|key| self.sessions.get(key))
    }

    pub fn active_mut(&mut self) -> Option<&mut DocumentSession> {
        match &self.active {
            Some(key) => self.sessions.get_mut(key),
            None => None,
        }
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_deref()
    }

    /// Open paths in sorted order.
    pub fn sessions(&self) -> Vec<&Path> {
        self.sessions.keys().map(PathBuf::as_path).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentSession> {
        self.sessions.values()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Paths of open documents with unsaved changes.
    pub fn unsaved(&self) -> Vec<&Path> {
        self.sessions
            .values()
            .filter(|session| session.is_dirty())
            .map(DocumentSession::path)
            .collect()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.sessions.values().any(DocumentSession::is_dirty)
    }

    pub fn log_suffix(&self) -> &str {
        &self.log_suffix
    }

    /// The session named by `path`, or the active one when `path` is `None`.
    pub fn resolve(&self, path: Option<&Path>) -> Result<&DocumentSession> {
        match path {
            Some(path) => self
                .get(path)
                .ok_or_else(|| EditorError::NotOpen(path.to_path_buf())),
            None => self.active().ok_or_else(EditorError::no_active_document),
        }
    }

    pub fn resolve_mut(&mut self, path: Option<&Path>) -> Result<&mut DocumentSession> {
        match path {
            Some(path) => {
                let missing = path.to_path_buf();
                self.get_mut(path).ok_or(EditorError::NotOpen(missing))
            }
            None => self.active_mut().ok_or_else(EditorError::no_active_document),
        }
    }

    /// Turns on audit logging for an open document. Returns `false` if it was already on.
    pub fn enable_logging(&mut self, path: &Path) -> Result<bool> {
        let suffix = self.log_suffix.clone();
        let session = self.resolve_mut(Some(path))?;
        if session.logger().is_some() {
            session.set_logging(true);
            return Ok(false);
        }
        let logger = FileLogger::new(session.path(), &suffix);
        let id = session.add_observer(Box::new(logger));
        session.set_logger(Some(id));
        session.set_logging(true);
        debug!(path = %session.path().display(), "audit logging enabled");
        Ok(true)
    }

    /// Turns off audit logging. Returns `false` if it was already off.
    pub fn disable_logging(&mut self, path: &Path) -> Result<bool> {
        let session = self.resolve_mut(Some(path))?;
        session.set_logging(false);
        match session.logger() {
            Some(id) => {
                session.remove_observer(id);
                session.set_logger(None);
                debug!(path = %session.path().display(), "audit logging disabled");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn snapshot(&self) -> WorkspaceMemento {
        WorkspaceMemento {
            files: self
                .sessions
                .values()
                .map(|session| FileState {
                    path: session.path().to_path_buf(),
                    modified: session.is_dirty(),
                    logging: session.logging_enabled(),
                })
                .collect(),
            active: self.active.clone(),
        }
    }
}
