//! # Document Session
//!
//! One open document: a [`LineBuffer`], its [`History`], the dirty and logging flags and
//! the observers listening to it. The session exclusively owns the buffer and lends it to
//! commands for the duration of each execute / undo / redo.
//!
//! ## Event Wiring
//!
//! At construction the session creates a channel, hands the sending half to its history
//! and keeps the receiving half. After every history call the session drains the channel
//! and notifies each observer in registration order. Observer failures are collected in
//! the returned [`EditReport`]; the edit itself has already completed.
//!
//! ## Dirty Flag
//!
//! Set by the session right after any successful push, undo or redo. Cleared only by
//! [`DocumentSession::mark_clean`], which callers invoke after a successful save.

use crate::buffer::LineBuffer;
use crate::command::EditCommand;
use crate::error::{EditorError, Result};
use crate::history::{History, HistoryEvent};
use crate::observer::EditorObserver;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Outcome of an edit, undo or redo on a session.
#[derive(Debug, Default)]
pub struct EditReport {
    /// Number of history transitions that changed the buffer.
    pub applied: usize,
    /// Observers that failed while being notified.
    pub observer_failures: Vec<EditorError>,
}

impl EditReport {
    pub fn changed(&self) -> bool {
        self.applied > 0
    }

    fn merge(&mut self, other: EditReport) {
        self.applied += other.applied;
        self.observer_failures.extend(other.observer_failures);
    }
}

pub struct DocumentSession {
    path: PathBuf,
    buffer: LineBuffer,
    history: History,
    events: Receiver<HistoryEvent>,
    dirty: bool,
    logging: bool,
    observers: Vec<(ObserverId, Box<dyn EditorObserver>)>,
    next_observer: u64,
    logger: Option<ObserverId>,
}

impl DocumentSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (sender, events) = mpsc::channel();
        Self {
            path: path.into(),
            buffer: LineBuffer::new(),
            history: History::with_events(sender),
            events,
            dirty: false,
            logging: false,
            observers: Vec::new(),
            next_observer: 0,
            logger: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Appends a line without going through history. Used only to populate a freshly
    /// opened document from disk.
    pub fn load_line(&mut self, text: impl Into<String>) {
        self.buffer.append(text);
    }

    /// Replaces the whole content and discards history, as when reloading from disk.
    pub fn reload(&mut self, lines: Vec<String>) {
        self.buffer = LineBuffer::from_lines(lines);
        self.history.clear();
        self.dirty = false;
    }

    pub fn push(&mut self, command: EditCommand) -> Result<EditReport> {
        self.history.push(command, &mut self.buffer)?;
        self.dirty = true;
        Ok(self.dispatch(1))
    }

    pub fn append(&mut self, text: &str) -> Result<EditReport> {
        self.push(EditCommand::append(text))
    }

    pub fn insert(&mut self, line: usize, col: usize, text: &str) -> Result<EditReport> {
        self.push(EditCommand::insert(line, col, text))
    }

    pub fn delete(&mut self, line: usize, col: usize, length: usize) -> Result<EditReport> {
        self.push(EditCommand::delete(line, col, length))
    }

    /// Delete followed by insert, recorded as two history entries. If the insert fails
    /// the delete is undone and dropped from history, the dirty flag goes back to what it
    /// was, and the insert error is returned.
    pub fn replace(
        &mut self,
        line: usize,
        col: usize,
        length: usize,
        text: &str,
    ) -> Result<EditReport> {
        let was_dirty = self.dirty;
        let mut report = self.push(EditCommand::delete(line, col, length))?;
        let insert_error =
            match self.history.push(EditCommand::insert(line, col, text), &mut self.buffer) {
                Ok(()) => {
                    report.merge(self.dispatch(1));
                    return Ok(report);
                }
                Err(e) => e,
            };

        match self.history.undo(&mut self.buffer) {
            Ok(_) => {
                self.history.clear_redo();
                self.dirty = was_dirty;
            }
            Err(rollback) => {
                warn!(path = %self.path.display(), error = %rollback, "could not roll back replace");
            }
        }
        let rollback = self.dispatch(0);
        for failure in rollback.observer_failures {
            warn!(path = %self.path.display(), error = %failure, "observer failed during replace rollback");
        }
        Err(insert_error)
    }

    /// `applied == 0` when there was nothing to undo.
    pub fn undo(&mut self) -> Result<EditReport> {
        if !self.history.undo(&mut self.buffer)? {
            return Ok(EditReport::default());
        }
        self.dirty = true;
        Ok(self.dispatch(1))
    }

    /// `applied == 0` when there was nothing to redo.
    pub fn redo(&mut self) -> Result<EditReport> {
        if !self.history.redo(&mut self.buffer)? {
            return Ok(EditReport::default());
        }
        self.dirty = true;
        Ok(self.dispatch(1))
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging
    }

    pub fn set_logging(&mut self, enabled: bool) {
        self.logging = enabled;
    }

    pub fn add_observer(&mut self, observer: Box<dyn EditorObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn logger(&self) -> Option<ObserverId> {
        self.logger
    }

    pub(crate) fn set_logger(&mut self, logger: Option<ObserverId>) {
        self.logger = logger;
    }

    fn dispatch(&mut self, applied: usize) -> EditReport {
        let mut report = EditReport {
            applied,
            observer_failures: Vec::new(),
        };
        let events: Vec<HistoryEvent> = self.events.try_iter().collect();
        for event in &events {
            for (_, observer) in self.observers.iter_mut() {
                if let Err(e) = observer.on_event(event) {
                    warn!(path = %self.path.display(), error = %e, "observer failed");
                    report.observer_failures.push(e);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<(EventKind, String)>>>;

    struct Recorder {
        seen: Seen,
    }

    impl EditorObserver for Recorder {
        fn on_event(&mut self, event: &HistoryEvent) -> Result<()> {
            self.seen
                .borrow_mut()
                .push((event.kind, event.description.clone()));
            Ok(())
        }
    }

    struct Failing;

    impl EditorObserver for Failing {
        fn on_event(&mut self, _event: &HistoryEvent) -> Result<()> {
            Err(EditorError::Io(std::io::Error::other("disk full")))
        }
    }

    fn recorder() -> (Box<dyn EditorObserver>, Seen) {
        let seen: Seen = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Recorder { seen: seen.clone() }), seen)
    }

    #[test]
    fn load_line_bypasses_history() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.load_line("one");
        session.load_line("two");
        assert_eq!(session.lines(), &["one", "two"]);
        assert!(!session.history().can_undo());
        assert!(!session.is_dirty());
    }

    #[test]
    fn edits_mark_dirty_until_clean() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.append("hello").unwrap();
        assert!(session.is_dirty());
        session.mark_clean();
        assert!(!session.is_dirty());
        session.undo().unwrap();
        assert!(session.is_dirty());
        session.mark_clean();
        session.redo().unwrap();
        assert!(session.is_dirty());
    }

    #[test]
    fn failed_edit_leaves_flag_and_content() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.load_line("abc");
        assert!(session.insert(3, 1, "x").is_err());
        assert!(!session.is_dirty());
        assert_eq!(session.lines(), &["abc"]);
    }

    #[test]
    fn nothing_to_undo_reports_no_change() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        let report = session.undo().unwrap();
        assert!(!report.changed());
        assert!(!session.is_dirty());
        assert!(!session.redo().unwrap().changed());
    }

    #[test]
    fn observers_see_every_transition_in_order() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        let (first, seen_first) = recorder();
        let (second, seen_second) = recorder();
        session.add_observer(first);
        session.add_observer(second);

        session.insert(1, 1, "A").unwrap();
        session.undo().unwrap();
        session.redo().unwrap();

        let kinds: Vec<EventKind> = seen_first.borrow().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Executed, EventKind::Undone, EventKind::Redone]
        );
        assert_eq!(seen_first.borrow()[0].1, "Insert(line=1, col=1, text=\"A\")");
        assert_eq!(*seen_first.borrow(), *seen_second.borrow());
    }

    #[test]
    fn removed_observer_is_not_notified() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        let (observer, seen) = recorder();
        let id = session.add_observer(observer);
        assert!(session.remove_observer(id));
        assert!(!session.remove_observer(id));
        session.append("x").unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn failing_observer_does_not_undo_edit() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.add_observer(Box::new(Failing));
        let (observer, seen) = recorder();
        session.add_observer(observer);

        let report = session.append("kept").unwrap();
        assert!(report.changed());
        assert_eq!(report.observer_failures.len(), 1);
        assert_eq!(session.lines(), &["kept"]);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn replace_takes_two_undo_steps() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.load_line("Hello World");
        let report = session.replace(1, 7, 5, "Rust").unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(session.lines(), &["Hello Rust"]);
        assert_eq!(session.history().undo_len(), 2);

        session.undo().unwrap();
        assert_eq!(session.lines(), &["Hello "]);
        session.undo().unwrap();
        assert_eq!(session.lines(), &["Hello World"]);
    }

    #[test]
    fn replace_rolls_back_delete_when_insert_fails() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.load_line("only");
        session.load_line("");
        let (observer, seen) = recorder();
        session.add_observer(observer);

        // Removing the trailing empty line leaves no line 2 for the insert.
        let err = session.replace(2, 1, 1, "x").unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(session.lines(), &["only", ""]);
        assert!(!session.history().can_undo());
        assert!(!session.history().can_redo());

        let kinds: Vec<EventKind> = seen.borrow().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![EventKind::Executed, EventKind::Undone]);
    }

    #[test]
    fn failed_replace_restores_dirty_flag() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.load_line("only");
        session.load_line("");
        assert!(session.replace(2, 1, 1, "x").is_err());
        assert!(!session.is_dirty());

        session.append("edit").unwrap();
        session.undo().unwrap();
        assert!(session.is_dirty());
        assert!(session.replace(2, 1, 1, "x").is_err());
        assert_eq!(session.lines(), &["only", ""]);
        assert!(session.is_dirty());
    }

    #[test]
    fn reload_discards_history() {
        let mut session = DocumentSession::new("/tmp/a.txt");
        session.append("x").unwrap();
        session.reload(vec!["from disk".into()]);
        assert_eq!(session.lines(), &["from disk"]);
        assert!(!session.history().can_undo());
        assert!(!session.is_dirty());
    }

    #[test]
    fn file_name_is_last_component() {
        let session = DocumentSession::new("/tmp/dir/notes.txt");
        assert_eq!(session.file_name(), "notes.txt");
    }
}
