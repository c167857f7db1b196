//! # Edit Commands
//!
//! Reversible units of mutation applied to a [`LineBuffer`]. Each variant pairs a forward
//! effect, fully determined by its intent (position and payload), with an exact inverse
//! that relies only on state captured the first time the command executed.
//!
//! Commands never hold the buffer. The owning session lends `&mut LineBuffer` for the
//! duration of each `execute` / `undo` call.
//!
//! ## Captured State
//!
//! Captured state is recorded on first execution and reused on every re-execution (redo).
//! It is never recomputed from the buffer, so a redo cannot silently diverge.
//!
//! - [`AppendCommand`]: captures nothing. Undo removes as many trailing lines as the
//!   text produced, clamped to what is present.
//! - [`DeleteCommand`]: a [`DeleteCapture`] distinguishing "nothing removed", "text
//!   removed" and "an empty line removed".
//! - [`InsertCommand`]: an [`InsertCapture`] with enough shape information to remove a
//!   multi-line insertion completely, including a line synthesized on an empty buffer.

use crate::buffer::{char_len, Deleted, LineBuffer};
use crate::error::Result;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Append(AppendCommand),
    Insert(InsertCommand),
    Delete(DeleteCommand),
}

impl EditCommand {
    pub fn append(text: &str) -> Self {
        EditCommand::Append(AppendCommand::new(text))
    }

    pub fn insert(line: usize, col: usize, text: impl Into<String>) -> Self {
        EditCommand::Insert(InsertCommand::new(line, col, text))
    }

    pub fn delete(line: usize, col: usize, length: usize) -> Self {
        EditCommand::Delete(DeleteCommand::new(line, col, length))
    }

    pub fn execute(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        match self {
            EditCommand::Append(cmd) => cmd.execute(buffer),
            EditCommand::Insert(cmd) => cmd.execute(buffer),
            EditCommand::Delete(cmd) => cmd.execute(buffer),
        }
    }

    pub fn undo(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        match self {
            EditCommand::Append(cmd) => cmd.undo(buffer),
            EditCommand::Insert(cmd) => cmd.undo(buffer),
            EditCommand::Delete(cmd) => cmd.undo(buffer),
        }
    }
}

impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditCommand::Append(cmd) => fmt::Display::fmt(cmd, f),
            EditCommand::Insert(cmd) => fmt::Display::fmt(cmd, f),
            EditCommand::Delete(cmd) => fmt::Display::fmt(cmd, f),
        }
    }
}

// --- Append ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendCommand {
    lines: Vec<String>,
}

impl AppendCommand {
    /// Splits `text` on `\n`; a trailing break yields a trailing empty line.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn execute(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        for line in &self.lines {
            buffer.append(line.clone());
        }
        Ok(())
    }

    fn undo(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        let removable = self.lines.len().min(buffer.size());
        buffer.remove_last_lines(removable)
    }
}

impl fmt::Display for AppendCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lines.as_slice() {
            [single] => write!(f, "Append(text={:?})", single),
            lines => write!(f, "Append(lines=+{})", lines.len()),
        }
    }
}

// --- Insert ---

/// Shape of a completed insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertCapture {
    /// Characters of the first segment, placed on the target line.
    pub first_len: usize,
    /// Number of lines the insertion added (line breaks in the text).
    pub added_lines: usize,
    /// Characters of the last segment, placed at the start of the last new line.
    pub last_len: usize,
    /// The buffer was empty and line 1 was synthesized.
    pub synthesized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertCommand {
    line: usize,
    col: usize,
    text: String,
    captured: Option<InsertCapture>,
}

impl InsertCommand {
    pub fn new(line: usize, col: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            col,
            text: text.into(),
            captured: None,
        }
    }

    pub fn captured(&self) -> Option<InsertCapture> {
        self.captured
    }

    fn execute(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        let synthesized = buffer.is_empty() && self.line == 1;
        buffer.insert(self.line, self.col, &self.text)?;

        if self.captured.is_none() {
            let segments: Vec<&str> = self.text.split('\n').collect();
            self.captured = Some(InsertCapture {
                first_len: segments.first().map(|s| char_len(s)).unwrap_or(0),
                added_lines: segments.len() - 1,
                last_len: segments.last().map(|s| char_len(s)).unwrap_or(0),
                synthesized,
            });
        }
        Ok(())
    }

    fn undo(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        let Some(capture) = self.captured else {
            return Ok(());
        };

        if capture.added_lines == 0 {
            if capture.first_len > 0 {
                buffer.delete(self.line, self.col, capture.first_len)?;
            }
        } else {
            buffer.remove_span(
                self.line,
                self.col,
                self.line + capture.added_lines,
                capture.last_len + 1,
            )?;
        }

        if capture.synthesized && buffer.size() == 1 && buffer.get_line(1)?.is_empty() {
            buffer.remove_last_lines(1)?;
        }
        Ok(())
    }
}

impl fmt::Display for InsertCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Insert(line={}, col={}, text={:?})",
            self.line, self.col, self.text
        )
    }
}

// --- Delete ---

/// What a delete removed, recorded at first execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteCapture {
    NotCaptured,
    Text(String),
    LineRemoval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    line: usize,
    col: usize,
    length: usize,
    captured: DeleteCapture,
}

impl DeleteCommand {
    pub fn new(line: usize, col: usize, length: usize) -> Self {
        Self {
            line,
            col,
            length,
            captured: DeleteCapture::NotCaptured,
        }
    }

    pub fn captured(&self) -> &DeleteCapture {
        &self.captured
    }

    fn execute(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        let removed = buffer.delete(self.line, self.col, self.length)?;
        if self.captured == DeleteCapture::NotCaptured {
            self.captured = match removed {
                Deleted::Nothing => DeleteCapture::Text(String::new()),
                Deleted::Text(text) => DeleteCapture::Text(text),
                Deleted::Line => DeleteCapture::LineRemoval,
            };
        }
        Ok(())
    }

    fn undo(&mut self, buffer: &mut LineBuffer) -> Result<()> {
        match &self.captured {
            DeleteCapture::NotCaptured => Ok(()),
            DeleteCapture::Text(text) if text.is_empty() => Ok(()),
            DeleteCapture::Text(text) => buffer.insert(self.line, self.col, text),
            DeleteCapture::LineRemoval => buffer.insert_line(self.line, String::new()),
        }
    }
}

impl fmt::Display for DeleteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Delete(line={}, col={}, length={})",
            self.line, self.col, self.length
        )
    }
}
