//! # Observers
//!
//! Listeners notified of every history transition of one document. Observers run
//! synchronously, in registration order, after the edit has already been applied; a
//! failing observer is reported to the caller but never rolls the edit back.
//!
//! [`FileLogger`] is the audit observer: it appends one line per event to a sidecar file
//! next to the document, e.g. `notes.txt` → `.notes.txt.log`:
//!
//! ```text
//! [2024-05-01 09:30:12] EXECUTE: Insert(line=1, col=1, text="Test")
//! [2024-05-01 09:30:15] UNDO: Insert(line=1, col=1, text="Test")
//! ```
//!
//! The sidecar always lives on the real filesystem, whatever store holds the document
//! itself. [`read_log`] reads it back from the same path the logger writes to, so
//! `log-show` sees exactly what was recorded.

use crate::error::{EditorError, Result};
use crate::history::HistoryEvent;
use crate::store::split_lines;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_SUFFIX: &str = ".log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait EditorObserver {
    fn on_event(&mut self, event: &HistoryEvent) -> Result<()>;
}

/// Sidecar log location for `document`: `.{file_name}{suffix}` in the same directory.
pub fn log_path_for(document: &Path, suffix: &str) -> PathBuf {
    let file_name = document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let log_name = format!(".{}{}", file_name, suffix);
    match document.parent() {
        Some(parent) => parent.join(log_name),
        None => PathBuf::from(log_name),
    }
}

/// Entries recorded for `document`, oldest first. A missing log reads as empty.
pub fn read_log(document: &Path, suffix: &str) -> Result<Vec<String>> {
    match fs::read_to_string(log_path_for(document, suffix)) {
        Ok(text) => Ok(split_lines(&text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(EditorError::Io(e)),
    }
}

pub struct FileLogger {
    log_path: PathBuf,
}

impl FileLogger {
    pub fn new(document: &Path, suffix: &str) -> Self {
        Self {
            log_path: log_path_for(document, suffix),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl EditorObserver for FileLogger {
    fn on_event(&mut self, event: &HistoryEvent) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "[{}] {}: {}", timestamp, event.kind, event.description)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::EventKind;

    #[test]
    fn log_path_is_hidden_sibling() {
        let path = log_path_for(Path::new("/tmp/docs/notes.txt"), ".log");
        assert_eq!(path, PathBuf::from("/tmp/docs/.notes.txt.log"));
    }

    #[test]
    fn appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("logged.txt");
        let mut logger = FileLogger::new(&doc, DEFAULT_LOG_SUFFIX);

        for kind in [EventKind::Executed, EventKind::Undone, EventKind::Redone] {
            logger
                .on_event(&HistoryEvent {
                    kind,
                    description: "Insert(line=1, col=1, text=\"A\")".into(),
                })
                .unwrap();
        }

        let content = fs::read_to_string(dir.path().join(".logged.txt.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(read_log(&doc, DEFAULT_LOG_SUFFIX).unwrap().len(), 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].contains("] EXECUTE: Insert(line=1"));
        assert!(lines[1].contains("UNDO"));
        assert!(lines[2].contains("REDO"));
    }

    #[test]
    fn missing_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("quiet.txt");
        assert!(read_log(&doc, DEFAULT_LOG_SUFFIX).unwrap().is_empty());
    }

    #[test]
    fn reports_unwritable_log() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("missing-dir").join("doc.txt");
        let mut logger = FileLogger::new(&doc, DEFAULT_LOG_SUFFIX);
        let result = logger.on_event(&HistoryEvent {
            kind: EventKind::Executed,
            description: "Append(text=\"x\")".into(),
        });
        assert!(result.is_err());
    }
}
