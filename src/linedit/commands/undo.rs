use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::workspace::Workspace;

pub fn undo(workspace: &mut Workspace) -> Result<CmdResult> {
    let session = workspace.resolve_mut(None)?;
    let report = session.undo()?;
    if !report.changed() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Nothing to undo")));
    }
    let mut result = CmdResult::default().with_message(CmdMessage::success("Undone"));
    result.add_observer_failures(report);
    Ok(result)
}

pub fn redo(workspace: &mut Workspace) -> Result<CmdResult> {
    let session = workspace.resolve_mut(None)?;
    let report = session.redo()?;
    if !report.changed() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Nothing to redo")));
    }
    let mut result = CmdResult::default().with_message(CmdMessage::success("Redone"));
    result.add_observer_failures(report);
    Ok(result)
}
