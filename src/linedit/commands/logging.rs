use super::{CmdMessage, CmdResult};
use crate::error::{EditorError, Result};
use crate::observer::read_log;
use crate::workspace::Workspace;

pub fn enable(workspace: &mut Workspace) -> Result<CmdResult> {
    let session = workspace.resolve(None)?;
    let key = session.path().to_path_buf();
    let name = session.file_name();
    let message = if workspace.enable_logging(&key)? {
        CmdMessage::success(format!("Audit logging enabled for {}", name))
    } else {
        CmdMessage::info(format!("Audit logging is already enabled for {}", name))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn disable(workspace: &mut Workspace) -> Result<CmdResult> {
    let session = workspace.resolve(None)?;
    let key = session.path().to_path_buf();
    let name = session.file_name();
    let message = if workspace.disable_logging(&key)? {
        CmdMessage::success(format!("Audit logging disabled for {}", name))
    } else {
        CmdMessage::info(format!("Audit logging is already disabled for {}", name))
    };
    Ok(CmdResult::default().with_message(message))
}

/// Returns the active document's audit log, one entry per line. The log is read from
/// the filesystem path [`crate::observer::FileLogger`] writes to, not through a store.
pub fn show(workspace: &Workspace) -> Result<CmdResult> {
    let session = workspace.resolve(None)?;
    if !session.logging_enabled() {
        return Err(EditorError::InvalidState(format!(
            "audit logging is not enabled for {}",
            session.file_name()
        )));
    }

    let lines = read_log(session.path(), workspace.log_suffix())?;
    if lines.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("(log is empty)")));
    }
    Ok(CmdResult::default().with_text_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{edit, undo, MessageLevel};

    #[test]
    fn log_show_requires_logging() {
        let mut ws = Workspace::default();
        ws.open_or_create(std::path::Path::new("/docs/a.txt"))
            .unwrap();
        assert!(matches!(
            show(&ws),
            Err(EditorError::InvalidState(_))
        ));
    }

    #[test]
    fn toggles_report_current_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::default();
        ws.open_or_create(&dir.path().join("a.txt")).unwrap();

        assert_eq!(enable(&mut ws).unwrap().messages[0].level, MessageLevel::Success);
        assert_eq!(enable(&mut ws).unwrap().messages[0].level, MessageLevel::Info);
        assert_eq!(disable(&mut ws).unwrap().messages[0].level, MessageLevel::Success);
        assert_eq!(disable(&mut ws).unwrap().messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn log_records_every_transition() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::default();
        ws.open_or_create(&dir.path().join("a.txt")).unwrap();
        enable(&mut ws).unwrap();

        let empty = show(&ws).unwrap();
        assert_eq!(empty.messages[0].content, "(log is empty)");

        edit::insert(&mut ws, 1, 1, "Test").unwrap();
        undo::undo(&mut ws).unwrap();
        undo::redo(&mut ws).unwrap();

        let result = show(&ws).unwrap();
        assert_eq!(result.text_lines.len(), 3);
        assert!(result.text_lines[0].ends_with("EXECUTE: Insert(line=1, col=1, text=\"Test\")"));
        assert!(result.text_lines[1].contains("] UNDO: "));
        assert!(result.text_lines[2].contains("] REDO: "));
    }

    #[test]
    fn disabled_logging_stops_recording() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::default();
        ws.open_or_create(&dir.path().join("a.txt")).unwrap();
        enable(&mut ws).unwrap();
        edit::append(&mut ws, "one").unwrap();
        disable(&mut ws).unwrap();
        edit::append(&mut ws, "two").unwrap();
        enable(&mut ws).unwrap();

        let result = show(&ws).unwrap();
        assert_eq!(result.text_lines.len(), 1);
    }
}
