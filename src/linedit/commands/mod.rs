//! # Command Layer
//!
//! One submodule per user-facing operation. Commands take the [`Workspace`] and a
//! [`DocumentStore`] explicitly, do the work, and describe the outcome in a [`CmdResult`].
//!
//! Commands never print, never exit and never prompt. The CLI decides how a
//! [`CmdResult`] looks on screen.
//!
//! ## Failures vs. Messages
//!
//! A command returns `Err` when the requested operation did not happen (bad position,
//! no active document, unreadable file). Outcomes that are not failures, such as
//! "nothing to undo" or an audit log that could not be appended after a successful
//! edit, are reported as info or warning messages on an `Ok` result.
//!
//! Tests here use `InMemoryStore`, except where a real sidecar file is involved.
//!
//! [`Workspace`]: crate::workspace::Workspace
//! [`DocumentStore`]: crate::store::DocumentStore

use crate::session::EditReport;
use serde::Serialize;
use std::path::PathBuf;

pub mod documents;
pub mod edit;
pub mod logging;
pub mod save;
pub mod show;
pub mod state;
pub mod tree;
pub mod undo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A document line together with its 1-based number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedLine {
    pub number: usize,
    pub text: String,
}

/// One row of `editor-list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub name: String,
    pub active: bool,
    pub modified: bool,
    pub logging: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    /// Document content to display (`show`).
    pub listed_lines: Vec<NumberedLine>,
    /// Open documents (`editor-list`).
    pub documents: Vec<DocumentEntry>,
    /// Preformatted output such as a directory tree or an audit log.
    pub text_lines: Vec<String>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_lines(mut self, lines: Vec<NumberedLine>) -> Self {
        self.listed_lines = lines;
        self
    }

    pub fn with_documents(mut self, documents: Vec<DocumentEntry>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_text_lines(mut self, lines: Vec<String>) -> Self {
        self.text_lines = lines;
        self
    }

    /// Turns observer failures of an otherwise successful edit into warnings.
    pub(crate) fn add_observer_failures(&mut self, report: EditReport) {
        for failure in report.observer_failures {
            self.add_message(CmdMessage::warning(format!(
                "audit log not updated: {}",
                failure
            )));
        }
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
