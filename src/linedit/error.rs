use std::path::PathBuf;
use thiserror::Error;

/// Boundary violations reported by the line buffer.
///
/// Every variant means the attempted mutation had no effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("line {line} is out of range (valid: 1-{max})")]
    Line { line: usize, max: usize },

    #[error("column {col} is out of range (valid: 1-{max})")]
    Column { col: usize, max: usize },

    #[error("deleting {length} characters from column {col} crosses the end of a line of length {line_len}")]
    Length {
        col: usize,
        length: usize,
        line_len: usize,
    },

    #[error("cannot remove {requested} lines, only {available} present")]
    Count { requested: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Out of range: {0}")]
    OutOfRange(#[from] RangeError),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Document not open: {}", .0.display())]
    NotOpen(PathBuf),

    #[error("Invalid input: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EditorError {
    pub fn no_active_document() -> Self {
        EditorError::InvalidState("no active document".to_string())
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, EditorError::OutOfRange(_))
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
