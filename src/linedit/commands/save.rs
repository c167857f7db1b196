use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Active,
    Path(PathBuf),
    All,
}

/// Writes one open document and clears its dirty flag. Returns its display name.
fn save_one<S: DocumentStore>(
    workspace: &mut Workspace,
    store: &mut S,
    path: Option<&Path>,
) -> Result<String> {
    let session = workspace.resolve_mut(path)?;
    store.write_lines(session.path(), session.lines())?;
    session.mark_clean();
    debug!(path = %session.path().display(), "saved document");
    Ok(session.file_name())
}

pub fn run<S: DocumentStore>(
    workspace: &mut Workspace,
    store: &mut S,
    target: SaveTarget,
) -> Result<CmdResult> {
    match target {
        SaveTarget::Active => {
            let name = save_one(workspace, store, None)?;
            Ok(CmdResult::default().with_message(CmdMessage::success(format!("Saved {}", name))))
        }
        SaveTarget::Path(path) => {
            let name = save_one(workspace, store, Some(&path))?;
            Ok(CmdResult::default().with_message(CmdMessage::success(format!("Saved {}", name))))
        }
        SaveTarget::All => save_all(workspace, store),
    }
}

/// Saves every open document, continuing past failures.
fn save_all<S: DocumentStore>(workspace: &mut Workspace, store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if workspace.is_empty() {
        result.add_message(CmdMessage::info("No open documents"));
        return Ok(result);
    }

    let paths: Vec<PathBuf> = workspace
        .sessions()
        .into_iter()
        .map(Path::to_path_buf)
        .collect();
    let mut saved = 0;
    let mut failed = 0;

    for path in &paths {
        match save_one(workspace, store, Some(path)) {
            Ok(name) => {
                saved += 1;
                result.add_message(CmdMessage::success(format!("Saved {}", name)));
            }
            Err(e) => {
                failed += 1;
                warn!(path = %path.display(), error = %e, "save failed");
                result.add_message(CmdMessage::error(format!(
                    "Failed to save {}: {}",
                    path.display(),
                    e
                )));
            }
        }
    }

    let summary = format!("saved {}, failed {}", saved, failed);
    result.add_message(if failed == 0 {
        CmdMessage::success(summary)
    } else {
        CmdMessage::warning(summary)
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::EditorError;
    use crate::store::memory::InMemoryStore;

    fn open(ws: &mut Workspace, path: &str, lines: &[&str]) {
        let session = ws.open_or_create(Path::new(path)).unwrap();
        for line in lines {
            session.append(line).unwrap();
        }
    }

    #[test]
    fn save_active_writes_and_cleans() {
        let mut store = InMemoryStore::new();
        let mut ws = Workspace::default();
        open(&mut ws, "/docs/a.txt", &["one", "two"]);
        assert!(ws.active().unwrap().is_dirty());

        let result = run(&mut ws, &mut store, SaveTarget::Active).unwrap();
        assert_eq!(result.messages[0].content, "Saved a.txt");
        assert_eq!(store.text(Path::new("/docs/a.txt")), Some("one\ntwo\n"));
        assert!(!ws.active().unwrap().is_dirty());
    }

    #[test]
    fn save_named_document() {
        let mut store = InMemoryStore::new();
        let mut ws = Workspace::default();
        open(&mut ws, "/docs/a.txt", &["a"]);
        open(&mut ws, "/docs/b.txt", &["b"]);

        run(
            &mut ws,
            &mut store,
            SaveTarget::Path(PathBuf::from("/docs/a.txt")),
        )
        .unwrap();
        assert_eq!(store.text(Path::new("/docs/a.txt")), Some("a\n"));
        assert!(store.text(Path::new("/docs/b.txt")).is_none());
        assert!(ws.get(Path::new("/docs/b.txt")).unwrap().is_dirty());
    }

    #[test]
    fn save_without_active_document_fails() {
        let mut store = InMemoryStore::new();
        let mut ws = Workspace::default();
        assert!(matches!(
            run(&mut ws, &mut store, SaveTarget::Active),
            Err(EditorError::InvalidState(_))
        ));
        assert!(matches!(
            run(&mut ws, &mut store, SaveTarget::Path(PathBuf::from("/x.txt"))),
            Err(EditorError::NotOpen(_))
        ));
    }

    #[test]
    fn save_all_counts_results() {
        let mut store = InMemoryStore::new();
        let mut ws = Workspace::default();
        open(&mut ws, "/docs/a.txt", &["a"]);
        open(&mut ws, "/docs/b.txt", &["b"]);

        let result = run(&mut ws, &mut store, SaveTarget::All).unwrap();
        let summary = result.messages.last().unwrap();
        assert_eq!(summary.content, "saved 2, failed 0");
        assert_eq!(summary.level, MessageLevel::Success);
        assert!(ws.iter().all(|s| !s.is_dirty()));
    }

    #[test]
    fn save_all_continues_past_failures() {
        let mut store = InMemoryStore::new();
        store.set_fail_writes(true);
        let mut ws = Workspace::default();
        open(&mut ws, "/docs/a.txt", &["a"]);
        open(&mut ws, "/docs/b.txt", &["b"]);

        let result = run(&mut ws, &mut store, SaveTarget::All).unwrap();
        assert!(result.has_errors());
        let summary = result.messages.last().unwrap();
        assert_eq!(summary.content, "saved 0, failed 2");
        assert_eq!(summary.level, MessageLevel::Warning);
        assert!(ws.iter().all(|s| s.is_dirty()));
    }

    #[test]
    fn save_all_reports_mixed_outcome() {
        let mut store = InMemoryStore::new();
        store.fail_writes_to("/docs/b.txt");
        let mut ws = Workspace::default();
        open(&mut ws, "/docs/a.txt", &["a"]);
        open(&mut ws, "/docs/b.txt", &["b"]);

        let result = run(&mut ws, &mut store, SaveTarget::All).unwrap();
        let contents: Vec<&str> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[0], "Saved a.txt");
        assert!(contents[1].starts_with("Failed to save /docs/b.txt: "));
        assert_eq!(contents[2], "saved 1, failed 1");
        assert_eq!(result.messages[1].level, MessageLevel::Error);
        assert_eq!(result.messages[2].level, MessageLevel::Warning);

        assert_eq!(store.text(Path::new("/docs/a.txt")), Some("a\n"));
        assert!(!ws.get(Path::new("/docs/a.txt")).unwrap().is_dirty());
        assert!(ws.get(Path::new("/docs/b.txt")).unwrap().is_dirty());
    }

    #[test]
    fn save_all_on_empty_workspace() {
        let mut store = InMemoryStore::new();
        let mut ws = Workspace::default();
        let result = run(&mut ws, &mut store, SaveTarget::All).unwrap();
        assert_eq!(result.messages[0].content, "No open documents");
    }
}
