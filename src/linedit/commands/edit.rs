use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::EditReport;
use crate::workspace::Workspace;

fn finish(report: EditReport, message: String) -> CmdResult {
    let mut result = CmdResult::default().with_message(CmdMessage::success(message));
    result.add_observer_failures(report);
    result
}

pub fn append(workspace: &mut Workspace, text: &str) -> Result<CmdResult> {
    let session = workspace.resolve_mut(None)?;
    let before = session.buffer().size();
    let report = session.append(text)?;
    let added = session.buffer().size() - before;
    let noun = if added == 1 { "line" } else { "lines" };
    Ok(finish(report, format!("Appended {} {}", added, noun)))
}

pub fn insert(workspace: &mut Workspace, line: usize, col: usize, text: &str) -> Result<CmdResult> {
    let session = workspace.resolve_mut(None)?;
    let report = session.insert(line, col, text)?;
    Ok(finish(report, format!("Inserted at {}:{}", line, col)))
}

pub fn delete(workspace: &mut Workspace, line: usize, col: usize, length: usize) -> Result<CmdResult> {
    let session = workspace.resolve_mut(None)?;
    let report = session.delete(line, col, length)?;
    Ok(finish(
        report,
        format!("Deleted {} characters at {}:{}", length, line, col),
    ))
}

pub fn replace(
    workspace: &mut Workspace,
    line: usize,
    col: usize,
    length: usize,
    text: &str,
) -> Result<CmdResult> {
    let session = workspace.resolve_mut(None)?;
    let report = session.replace(line, col, length, text)?;
    Ok(finish(
        report,
        format!("Replaced {} characters at {}:{}", length, line, col),
    ))
}
