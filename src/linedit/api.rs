//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every editor
//! operation, whatever the front end. It owns the [`Workspace`], the store and the
//! [`EditorConfig`], parses positional arguments and dispatches to `commands/*.rs`.
//!
//! ## Positions
//!
//! - Position: `line:col`, both 1-based (`3:1`).
//! - Range: `start:end`, inclusive line numbers (`2:5`).
//! - Length: a plain non-negative integer.
//!
//! Malformed input is an [`EditorError::Parse`]; well-formed input outside the document is
//! left for the buffer to reject as out of range.
//!
//! ## Generic Over DocumentStore
//!
//! `EditorApi<FileStore>` in production, `EditorApi<InMemoryStore>` in tests.

use crate::commands;
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::store::DocumentStore;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl std::str::FromStr for Position {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        let (line, col) = parse_pair(s, "position", "line:col")?;
        Ok(Position { line, col })
    }
}

pub fn parse_range(s: &str) -> Result<(usize, usize)> {
    parse_pair(s, "range", "start:end")
}

pub fn parse_length(s: &str) -> Result<usize> {
    s.trim()
        .parse()
        .map_err(|_| EditorError::Parse(format!("invalid length '{}': expected a number", s)))
}

fn parse_pair(s: &str, what: &str, shape: &str) -> Result<(usize, usize)> {
    let invalid = || EditorError::Parse(format!("invalid {} '{}': expected {}", what, s, shape));
    let (first, second) = s.split_once(':').ok_or_else(invalid)?;
    let first = first.trim().parse().map_err(|_| invalid())?;
    let second = second.trim().parse().map_err(|_| invalid())?;
    Ok((first, second))
}

pub struct EditorApi<S: DocumentStore> {
    store: S,
    workspace: Workspace,
    config: EditorConfig,
}

impl<S: DocumentStore> EditorApi<S> {
    pub fn new(store: S, config: EditorConfig) -> Self {
        let workspace = Workspace::new(config.log_suffix.clone());
        Self {
            store,
            workspace,
            config,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn load(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::documents::load(
            &mut self.workspace,
            &self.store,
            path,
            &self.config.log_marker,
        )
    }

    pub fn init(&mut self, path: &Path, with_log: bool) -> Result<commands::CmdResult> {
        commands::documents::init(
            &mut self.workspace,
            &self.store,
            path,
            with_log,
            &self.config.log_marker,
        )
    }

    pub fn save(&mut self, target: SaveTarget) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.workspace, &mut self.store, target)
    }

    pub fn close(&mut self, path: Option<&Path>) -> Result<commands::CmdResult> {
        commands::documents::close(&mut self.workspace, path)
    }

    pub fn edit(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::documents::edit(&mut self.workspace, path)
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::documents::list(&self.workspace)
    }

    pub fn append(&mut self, text: &str) -> Result<commands::CmdResult> {
        commands::edit::append(&mut self.workspace, text)
    }

    pub fn insert(&mut self, position: &str, text: &str) -> Result<commands::CmdResult> {
        let pos: Position = position.parse()?;
        commands::edit::insert(&mut self.workspace, pos.line, pos.col, text)
    }

    pub fn delete(&mut self, position: &str, length: &str) -> Result<commands::CmdResult> {
        let pos: Position = position.parse()?;
        let length = parse_length(length)?;
        commands::edit::delete(&mut self.workspace, pos.line, pos.col, length)
    }

    pub fn replace(
        &mut self,
        position: &str,
        length: &str,
        text: &str,
    ) -> Result<commands::CmdResult> {
        let pos: Position = position.parse()?;
        let length = parse_length(length)?;
        commands::edit::replace(&mut self.workspace, pos.line, pos.col, length, text)
    }

    pub fn show(&self, range: Option<&str>) -> Result<commands::CmdResult> {
        let range = range.map(parse_range).transpose()?;
        commands::show::run(&self.workspace, range)
    }

    pub fn undo(&mut self) -> Result<commands::CmdResult> {
        commands::undo::undo(&mut self.workspace)
    }

    pub fn redo(&mut self) -> Result<commands::CmdResult> {
        commands::undo::redo(&mut self.workspace)
    }

    pub fn log_on(&mut self) -> Result<commands::CmdResult> {
        commands::logging::enable(&mut self.workspace)
    }

    pub fn log_off(&mut self) -> Result<commands::CmdResult> {
        commands::logging::disable(&mut self.workspace)
    }

    pub fn log_show(&self) -> Result<commands::CmdResult> {
        commands::logging::show(&self.workspace)
    }

    pub fn dir_tree(&self, dir: &Path) -> Result<commands::CmdResult> {
        commands::tree::run(&self.store, dir)
    }

    pub fn save_state(&mut self, state_file: &Path) -> Result<commands::CmdResult> {
        commands::state::save_state(&self.workspace, &mut self.store, state_file)
    }

    pub fn restore_state(&mut self, state_file: &Path) -> Result<commands::CmdResult> {
        commands::state::restore_state(&mut self.workspace, &self.store, state_file)
    }
}

/// Interprets the optional argument of `save`: nothing, `all`, or a path.
pub fn save_target(arg: Option<&str>) -> SaveTarget {
    match arg {
        None => SaveTarget::Active,
        Some(arg) if arg.eq_ignore_ascii_case("all") => SaveTarget::All,
        Some(path) => SaveTarget::Path(PathBuf::from(path)),
    }
}

pub use commands::save::SaveTarget;
pub use commands::{CmdMessage, CmdResult, DocumentEntry, MessageLevel, NumberedLine};
