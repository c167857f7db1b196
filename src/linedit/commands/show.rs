use super::{CmdMessage, CmdResult, NumberedLine};
use crate::error::{EditorError, RangeError, Result};
use crate::workspace::Workspace;

/// Lists the active document's lines, optionally restricted to `start..=end`.
pub fn run(workspace: &Workspace, range: Option<(usize, usize)>) -> Result<CmdResult> {
    let session = workspace.resolve(None)?;
    let size = session.buffer().size();
    if size == 0 {
        return Ok(CmdResult::default().with_message(CmdMessage::info("(empty)")));
    }

    let (start, end) = range.unwrap_or((1, size));
    if start < 1 {
        return Err(RangeError::Line {
            line: start,
            max: size,
        }
        .into());
    }
    if end > size {
        return Err(RangeError::Line {
            line: end,
            max: size,
        }
        .into());
    }
    if start > end {
        return Err(EditorError::Parse(format!(
            "start line {} is after end line {}",
            start, end
        )));
    }

    let lines = session.lines()[start - 1..end]
        .iter()
        .enumerate()
        .map(|(offset, text)| NumberedLine {
            number: start + offset,
            text: text.clone(),
        })
        .collect();
    Ok(CmdResult::default().with_listed_lines(lines))
}
