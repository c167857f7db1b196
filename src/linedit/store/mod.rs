//! # Storage Layer
//!
//! Whole-document persistence behind the [`DocumentStore`] trait. The editing core never
//! touches the filesystem; commands read and write documents, the workspace memento and
//! audit logs through a store.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the real filesystem. Writes go to a uniquely named temp file in the
//!   target directory (`.{name}-{uuid}.tmp`) and are then renamed over the target.
//! - [`memory::InMemoryStore`]: a map of paths to text, for tests.
//!
//! ## Line Format
//!
//! Documents are stored as text with `\n` after every line. On read a trailing `\r` is
//! dropped from each line and a final terminator does not produce an extra empty line,
//! so `"a\nb\n"` and `"a\r\nb"` both read as `["a", "b"]`. Line endings are not preserved.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    /// True for directories, including symlinks that resolve to one.
    pub is_dir: bool,
    /// The entry itself is a symbolic link.
    pub is_symlink: bool,
}

pub trait DocumentStore {
    /// True when `path` names an existing regular file.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Raw file content, `None` when the file does not exist.
    fn read_text(&self, path: &Path) -> Result<Option<String>>;

    /// Replaces the file content, creating missing parent directories.
    fn write_text(&mut self, path: &Path, text: &str) -> Result<()>;

    /// Direct children of `path`, in no particular order.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        Ok(self.read_text(path)?.map(|text| split_lines(&text)))
    }

    fn write_lines(&mut self, path: &Path, lines: &[String]) -> Result<()> {
        self.write_text(path, &join_lines(lines))
    }
}

pub fn split_lines(text: &str) -> Vec<String> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    if body.is_empty() && text.is_empty() {
        return Vec::new();
    }
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

pub fn join_lines(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_final_terminator() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn split_strips_carriage_returns() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn split_keeps_blank_lines() {
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn join_terminates_every_line() {
        let lines = vec!["a".to_string(), String::new()];
        assert_eq!(join_lines(&lines), "a\n\n");
        assert_eq!(split_lines(&join_lines(&lines)), lines);
        assert_eq!(join_lines(&[]), "");
    }
}
