use super::{CmdMessage, CmdResult, DocumentEntry};
use crate::error::{EditorError, Result};
use crate::store::DocumentStore;
use crate::workspace::Workspace;
use std::path::Path;
use tracing::debug;

/// Opens `path` from the store (empty if the file does not exist) and makes it active.
/// A document whose first line equals `log_marker` gets audit logging turned on.
pub fn load<S: DocumentStore>(
    workspace: &mut Workspace,
    store: &S,
    path: &Path,
    log_marker: &str,
) -> Result<CmdResult> {
    if workspace.is_open(path) {
        let session = workspace.open_or_create(path)?;
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "{} is already open",
            session.file_name()
        ))));
    }

    let lines = store.read_lines(path)?;
    let session = workspace.open_or_create(path)?;
    let name = session.file_name();
    let key = session.path().to_path_buf();

    let mut result = CmdResult::default();
    match lines {
        Some(lines) => {
            let count = lines.len();
            let wants_log = lines.first().is_some_and(|first| first == log_marker);
            for line in lines {
                session.load_line(line);
            }
            debug!(path = %key.display(), lines = count, "loaded document");
            result.add_message(CmdMessage::success(format!(
                "Loaded {} ({} lines)",
                name, count
            )));
            if wants_log {
                workspace.enable_logging(&key)?;
                result.add_message(CmdMessage::info(format!(
                    "Audit logging enabled for {}",
                    name
                )));
            }
        }
        None => {
            result.add_message(CmdMessage::success(format!("Opened new file {}", name)));
        }
    }
    Ok(result)
}

/// Opens an empty, clean document without reading the store. With `with_log`, the log
/// marker becomes the first line and audit logging is turned on. A file already on disk
/// is left alone but reported, since the next save replaces it.
pub fn init<S: DocumentStore>(
    workspace: &mut Workspace,
    store: &S,
    path: &Path,
    with_log: bool,
    log_marker: &str,
) -> Result<CmdResult> {
    if workspace.is_open(path) {
        let session = workspace.open_or_create(path)?;
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "{} is already open",
            session.file_name()
        ))));
    }

    let session = workspace.open_or_create(path)?;
    let name = session.file_name();
    let key = session.path().to_path_buf();
    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Created {}",
        name
    )));
    if store.exists(&key) {
        result.add_message(CmdMessage::warning(format!(
            "{} already exists on disk and will be overwritten on save",
            name
        )));
    }

    if with_log {
        session.load_line(log_marker);
        workspace.enable_logging(&key)?;
        result.add_message(CmdMessage::info(format!(
            "Audit logging enabled for {}",
            name
        )));
    }
    Ok(result)
}

/// Closes the named document, or the active one. Unsaved changes are discarded.
pub fn close(workspace: &mut Workspace, path: Option<&Path>) -> Result<CmdResult> {
    let (key, name, dirty) = match path {
        Some(path) => match workspace.get(path) {
            Some(session) => (
                session.path().to_path_buf(),
                session.file_name(),
                session.is_dirty(),
            ),
            None => {
                return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
                    "{} is not open",
                    path.display()
                ))))
            }
        },
        None => {
            let session = workspace.resolve(None)?;
            (
                session.path().to_path_buf(),
                session.file_name(),
                session.is_dirty(),
            )
        }
    };

    workspace.close(&key);
    let mut result =
        CmdResult::default().with_message(CmdMessage::success(format!("Closed {}", name)));
    if dirty {
        result.add_message(CmdMessage::warning(format!(
            "Unsaved changes to {} were discarded",
            name
        )));
    }
    Ok(result)
}

/// Switches the active document.
pub fn edit(workspace: &mut Workspace, path: &Path) -> Result<CmdResult> {
    if !workspace.set_active(path) {
        return Err(EditorError::NotOpen(path.to_path_buf()));
    }
    let session = workspace.resolve(None)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Now editing {}",
        session.file_name()
    ))))
}

pub fn list(workspace: &Workspace) -> Result<CmdResult> {
    if workspace.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No open documents")));
    }
    let active = workspace.active_path();
    let documents = workspace
        .iter()
        .map(|session| DocumentEntry {
            path: session.path().to_path_buf(),
            name: session.file_name(),
            active: active == Some(session.path()),
            modified: session.is_dirty(),
            logging: session.logging_enabled(),
        })
        .collect();
    Ok(CmdResult::default().with_documents(documents))
}
