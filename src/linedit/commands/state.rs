use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::memento::WorkspaceMemento;
use crate::store::DocumentStore;
use crate::workspace::Workspace;
use std::path::Path;
use tracing::{debug, warn};

pub fn save_state<S: DocumentStore>(
    workspace: &Workspace,
    store: &mut S,
    state_file: &Path,
) -> Result<CmdResult> {
    let memento = workspace.snapshot();
    memento.save(store, state_file)?;
    debug!(path = %state_file.display(), files = memento.files.len(), "saved workspace state");
    Ok(CmdResult::default().with_message(CmdMessage::info("Workspace state saved")))
}

/// Re-opens the documents recorded in `state_file`. Content comes from the store; the
/// dirty and logging flags and the active path come from the snapshot. Documents that
/// are already open are left untouched. A missing state file restores nothing.
pub fn restore_state<S: DocumentStore>(
    workspace: &mut Workspace,
    store: &S,
    state_file: &Path,
) -> Result<CmdResult> {
    let Some(memento) = WorkspaceMemento::load(store, state_file)? else {
        return Ok(CmdResult::default());
    };

    let previous_active = workspace.active_path().map(Path::to_path_buf);
    let mut result = CmdResult::default();
    let mut restored = 0;

    for file in &memento.files {
        if workspace.is_open(&file.path) {
            continue;
        }
        let lines = match store.read_lines(&file.path) {
            Ok(lines) => lines.unwrap_or_default(),
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "could not restore document");
                result.add_message(CmdMessage::warning(format!(
                    "Could not restore {}: {}",
                    file.path.display(),
                    e
                )));
                continue;
            }
        };

        let session = workspace.open_or_create(&file.path)?;
        for line in lines {
            session.load_line(line);
        }
        if file.modified {
            session.mark_dirty();
        }
        if file.logging {
            workspace.enable_logging(&file.path)?;
        }
        restored += 1;
    }

    let active = memento
        .active
        .filter(|path| workspace.is_open(path))
        .or(previous_active);
    match active {
        Some(path) => {
            workspace.set_active(&path);
        }
        None => workspace.clear_active(),
    }

    if restored > 0 {
        let noun = if restored == 1 { "document" } else { "documents" };
        result.add_message(CmdMessage::info(format!(
            "Restored {} {}",
            restored, noun
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memento::FileState;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    const STATE: &str = "/data/workspace.json";

    #[test]
    fn missing_state_file_is_not_an_error() {
        let store = InMemoryStore::new();
        let mut ws = Workspace::default();
        let result = restore_state(&mut ws, &store, Path::new(STATE)).unwrap();
        assert!(result.messages.is_empty());
        assert!(ws.is_empty());
    }

    #[test]
    fn restores_content_flags_and_active() {
        let mut store = InMemoryStore::new()
            .with_file("/docs/a.txt", "alpha\n")
            .with_file("/docs/b.txt", "beta\n");
        let mut ws = Workspace::default();
        ws.open_or_create(Path::new("/docs/a.txt"))
            .unwrap()
            .append("unsaved")
            .unwrap();
        ws.open_or_create(Path::new("/docs/b.txt")).unwrap();
        ws.get_mut(Path::new("/docs/b.txt")).unwrap().set_logging(true);
        ws.set_active(Path::new("/docs/a.txt"));
        save_state(&ws, &mut store, Path::new(STATE)).unwrap();

        let mut fresh = Workspace::default();
        let result = restore_state(&mut fresh, &store, Path::new(STATE)).unwrap();
        assert_eq!(result.messages[0].content, "Restored 2 documents");

        let a = fresh.get(Path::new("/docs/a.txt")).unwrap();
        assert_eq!(a.lines(), &["alpha"]);
        assert!(a.is_dirty());
        assert!(!a.history().can_undo());
        let b = fresh.get(Path::new("/docs/b.txt")).unwrap();
        assert!(b.logging_enabled());
        assert!(!b.is_dirty());
        assert_eq!(fresh.active_path(), Some(Path::new("/docs/a.txt")));
    }

    #[test]
    fn missing_documents_restore_empty() {
        let mut store = InMemoryStore::new();
        WorkspaceMemento {
            files: vec![FileState {
                path: PathBuf::from("/docs/gone.txt"),
                modified: false,
                logging: false,
            }],
            active: None,
        }
        .save(&mut store, Path::new(STATE))
        .unwrap();

        let mut ws = Workspace::default();
        restore_state(&mut ws, &store, Path::new(STATE)).unwrap();
        assert_eq!(ws.get(Path::new("/docs/gone.txt")).unwrap().buffer().size(), 0);
        assert!(ws.active().is_none());
    }

    #[test]
    fn already_open_documents_are_left_alone() {
        let mut store = InMemoryStore::new().with_file("/docs/a.txt", "disk\n");
        WorkspaceMemento {
            files: vec![FileState {
                path: PathBuf::from("/docs/a.txt"),
                modified: true,
                logging: false,
            }],
            active: Some(PathBuf::from("/docs/a.txt")),
        }
        .save(&mut store, Path::new(STATE))
        .unwrap();

        let mut ws = Workspace::default();
        ws.open_or_create(Path::new("/docs/a.txt"))
            .unwrap()
            .load_line("memory");
        let result = restore_state(&mut ws, &store, Path::new(STATE)).unwrap();
        assert!(result.messages.is_empty());

        let a = ws.get(Path::new("/docs/a.txt")).unwrap();
        assert_eq!(a.lines(), &["memory"]);
        assert!(!a.is_dirty());
    }
}
