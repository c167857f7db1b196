//! # History
//!
//! The undo/redo controller for one document: two stacks of [`EditCommand`]s.
//!
//! - `done`: executed commands, most recent last.
//! - `undone`: undone commands, most recent last.
//!
//! Commands move between the stacks; only [`History::clear`] discards them. Pushing a new
//! command clears `undone` (history is linear, there are no branches).
//!
//! Every successful transition emits a [`HistoryEvent`] on the channel handed to
//! [`History::with_events`]. The owning session wires that channel once, at construction,
//! and fans the events out to its observers.

use crate::buffer::LineBuffer;
use crate::command::EditCommand;
use crate::error::Result;
use std::fmt;
use std::sync::mpsc::Sender;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Executed,
    Undone,
    Redone,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Executed => "EXECUTE",
            EventKind::Undone => "UNDO",
            EventKind::Redone => "REDO",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    pub kind: EventKind,
    pub description: String,
}

impl HistoryEvent {
    fn new(kind: EventKind, command: &EditCommand) -> Self {
        Self {
            kind,
            description: command.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct History {
    done: Vec<EditCommand>,
    undone: Vec<EditCommand>,
    events: Option<Sender<HistoryEvent>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Sender<HistoryEvent>) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    /// Executes `command` and records it. On failure nothing is recorded and the redo
    /// stack is kept.
    pub fn push(&mut self, mut command: EditCommand, buffer: &mut LineBuffer) -> Result<()> {
        command.execute(buffer)?;
        debug!(command = %command, "executed");
        self.emit(EventKind::Executed, &command);
        self.done.push(command);
        self.undone.clear();
        Ok(())
    }

    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut LineBuffer) -> Result<bool> {
        let Some(mut command) = self.done.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.undo(buffer) {
            self.done.push(command);
            return Err(e);
        }
        debug!(command = %command, "undone");
        self.emit(EventKind::Undone, &command);
        self.undone.push(command);
        Ok(true)
    }

    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, buffer: &mut LineBuffer) -> Result<bool> {
        let Some(mut command) = self.undone.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.execute(buffer) {
            self.undone.push(command);
            return Err(e);
        }
        debug!(command = %command, "redone");
        self.emit(EventKind::Redone, &command);
        self.done.push(command);
        Ok(true)
    }

    /// Discards both stacks.
    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    /// Forgets the undone commands without touching the buffer.
    pub(crate) fn clear_redo(&mut self) {
        self.undone.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.done.len()
    }

    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }

    fn emit(&self, kind: EventKind, command: &EditCommand) {
        if let Some(events) = &self.events {
            // A dropped receiver only means nobody is listening.
            let _ = events.send(HistoryEvent::new(kind, command));
        }
    }
}
