//! # Line Buffer
//!
//! The ordered, mutable sequence of text lines that backs one document. The buffer owns
//! all content and knows nothing about history, files or observers.
//!
//! ## Addressing
//!
//! Every line and column argument is **1-based**. Lines are numbered `1..=size()`.
//! A column addresses a position *before* a character, so on a line of length `n` the
//! valid insertion columns are `1..=n + 1` (`n + 1` meaning "after the last character").
//!
//! Columns count Unicode scalar values (`char`s), never bytes, so no operation can split
//! a multi-byte sequence. Grapheme clusters are not taken into account.
//!
//! ## Failure Atomicity
//!
//! Every mutating operation validates all of its arguments before touching the lines.
//! On error the buffer is left exactly as it was.

use crate::error::{RangeError, Result};
use std::fmt;

/// What a [`LineBuffer::delete`] call actually removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deleted {
    /// Zero-length delete, nothing changed.
    Nothing,
    /// Characters removed from within a line.
    Text(String),
    /// An empty line was removed from the buffer.
    Line,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Current line count.
    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get_line(&self, line: usize) -> Result<&str> {
        let idx = self.index(line)?;
        Ok(&self.lines[idx])
    }

    /// Length of `line` in characters.
    pub fn line_len(&self, line: usize) -> Result<usize> {
        let idx = self.index(line)?;
        Ok(char_len(&self.lines[idx]))
    }

    /// Adds `text` as a new final line. Line breaks inside `text` are kept verbatim.
    pub fn append(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Inserts `text` at `col` of `line`, splitting the line on every `\n` in `text`.
    ///
    /// On an empty buffer, `line == 1` is accepted: an empty line is synthesized first.
    pub fn insert(&mut self, line: usize, col: usize, text: &str) -> Result<()> {
        let synthesize = self.lines.is_empty() && line == 1;
        let current_len = if synthesize { 0 } else { self.line_len(line)? };
        check_column(col, current_len + 1)?;

        if synthesize {
            self.lines.push(String::new());
        }

        let idx = line - 1;
        let split_at = byte_offset(&self.lines[idx], col - 1);
        let remainder = self.lines[idx].split_off(split_at);

        let mut segments = text.split('\n');
        self.lines[idx].push_str(segments.next().unwrap_or_default());

        let mut new_lines: Vec<String> = segments.map(str::to_string).collect();
        match new_lines.last_mut() {
            Some(last) => last.push_str(&remainder),
            None => self.lines[idx].push_str(&remainder),
        }
        self.lines.splice(idx + 1..idx + 1, new_lines);

        Ok(())
    }

    /// Removes `length` characters starting at `col` of `line`. Never crosses lines.
    ///
    /// - `length == 0` validates `col` against `1..=len + 1` and changes nothing.
    /// - On an empty line with `length > 0`, `col` must be 1 and the line itself is removed.
    /// - Otherwise `col` must be in `1..=len` and the span must end within the line.
    pub fn delete(&mut self, line: usize, col: usize, length: usize) -> Result<Deleted> {
        let idx = self.index(line)?;
        let len = char_len(&self.lines[idx]);

        if length == 0 {
            check_column(col, len + 1)?;
            return Ok(Deleted::Nothing);
        }

        if len == 0 {
            check_column(col, 1)?;
            self.lines.remove(idx);
            return Ok(Deleted::Line);
        }

        check_column(col, len)?;
        if length > len - (col - 1) {
            return Err(RangeError::Length {
                col,
                length,
                line_len: len,
            }
            .into());
        }

        let current = &mut self.lines[idx];
        let start = byte_offset(current, col - 1);
        let end = byte_offset(current, col - 1 + length);
        let removed: String = current.drain(start..end).collect();
        Ok(Deleted::Text(removed))
    }

    /// Inserts `text` as a whole new line so that it becomes line `line` (`1..=size() + 1`).
    pub fn insert_line(&mut self, line: usize, text: impl Into<String>) -> Result<()> {
        if line < 1 || line > self.lines.len() + 1 {
            return Err(RangeError::Line {
                line,
                max: self.lines.len() + 1,
            }
            .into());
        }
        self.lines.insert(line - 1, text.into());
        Ok(())
    }

    /// Drops the last `count` lines.
    pub fn remove_last_lines(&mut self, count: usize) -> Result<()> {
        if count > self.lines.len() {
            return Err(RangeError::Count {
                requested: count,
                available: self.lines.len(),
            }
            .into());
        }
        self.lines.truncate(self.lines.len() - count);
        Ok(())
    }

    /// Removes the text between `(line, col)` and `(end_line, end_col)`, end exclusive,
    /// joining the head of `line` with the tail of `end_line`.
    ///
    /// Returns the removed text with `\n` between lines.
    pub fn remove_span(
        &mut self,
        line: usize,
        col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Result<String> {
        let start_len = self.line_len(line)?;
        let end_len = self.line_len(end_line)?;
        check_column(col, start_len + 1)?;
        check_column(end_col, end_len + 1)?;
        if end_line < line {
            return Err(RangeError::Line {
                line: end_line,
                max: self.lines.len(),
            }
            .into());
        }
        if end_line == line && end_col < col {
            return Err(RangeError::Column {
                col: end_col,
                max: start_len + 1,
            }
            .into());
        }

        let start_idx = line - 1;
        let end_idx = end_line - 1;

        if start_idx == end_idx {
            let current = &mut self.lines[start_idx];
            let start = byte_offset(current, col - 1);
            let end = byte_offset(current, end_col - 1);
            return Ok(current.drain(start..end).collect());
        }

        let tail_line = &self.lines[end_idx];
        let tail_at = byte_offset(tail_line, end_col - 1);
        let tail = tail_line[tail_at..].to_string();

        let mut removed_lines: Vec<String> = self.lines.drain(start_idx + 1..=end_idx).collect();
        if let Some(last) = removed_lines.last_mut() {
            last.truncate(tail_at);
        }

        let head = &mut self.lines[start_idx];
        let head_at = byte_offset(head, col - 1);
        let mut removed = head.split_off(head_at);
        head.push_str(&tail);

        for segment in removed_lines {
            removed.push('\n');
            removed.push_str(&segment);
        }
        Ok(removed)
    }

    fn index(&self, line: usize) -> Result<usize> {
        if line < 1 || line > self.lines.len() {
            return Err(RangeError::Line {
                line,
                max: self.lines.len(),
            }
            .into());
        }
        Ok(line - 1)
    }
}

impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `chars`-th character, or `s.len()` past the end.
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

fn check_column(col: usize, max: usize) -> Result<()> {
    if col < 1 || col > max {
        return Err(RangeError::Column { col, max }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    fn buffer(lines: &[&str]) -> LineBuffer {
        LineBuffer::from_lines(lines.iter().copied())
    }

    #[test]
    fn starts_empty() {
        let buf = LineBuffer::new();
        assert_eq!(buf.size(), 0);
        assert!(buf.get_line(1).is_err());
    }

    #[test]
    fn get_line_rejects_zero_and_past_end() {
        let buf = buffer(&["a", "b"]);
        assert_eq!(buf.get_line(2).unwrap(), "b");
        assert!(matches!(
            buf.get_line(0),
            Err(EditorError::OutOfRange(RangeError::Line { line: 0, max: 2 }))
        ));
        assert!(buf.get_line(3).unwrap_err().is_out_of_range());
    }

    #[test]
    fn append_never_splits() {
        let mut buf = LineBuffer::new();
        buf.append("one\ntwo");
        assert_eq!(buf.size(), 1);
        assert_eq!(buf.get_line(1).unwrap(), "one\ntwo");
    }

    #[test]
    fn insert_in_middle_of_line() {
        let mut buf = buffer(&["Hello World"]);
        buf.insert(1, 7, "Beautiful ").unwrap();
        assert_eq!(buf.get_line(1).unwrap(), "Hello Beautiful World");
    }

    #[test]
    fn insert_at_line_end() {
        let mut buf = buffer(&["abc"]);
        buf.insert(1, 4, "!").unwrap();
        assert_eq!(buf.get_line(1).unwrap(), "abc!");
    }

    #[test]
    fn insert_into_empty_buffer_synthesizes_line() {
        let mut buf = LineBuffer::new();
        buf.insert(1, 1, "First text").unwrap();
        assert_eq!(buf.size(), 1);
        assert_eq!(buf.get_line(1).unwrap(), "First text");
    }

    #[test]
    fn failed_insert_into_empty_buffer_leaves_it_empty() {
        let mut buf = LineBuffer::new();
        assert!(buf.insert(1, 2, "x").is_err());
        assert_eq!(buf.size(), 0);
        assert!(buf.insert(2, 1, "x").is_err());
        assert_eq!(buf.size(), 0);
    }

    #[test]
    fn insert_rejects_bad_column() {
        let mut buf = buffer(&["abc"]);
        assert!(matches!(
            buf.insert(1, 5, "x"),
            Err(EditorError::OutOfRange(RangeError::Column { col: 5, max: 4 }))
        ));
        assert!(buf.insert(1, 0, "x").is_err());
        assert_eq!(buf.get_line(1).unwrap(), "abc");
    }

    #[test]
    fn insert_with_two_breaks_adds_two_lines() {
        let mut buf = buffer(&["abcdef"]);
        buf.insert(1, 4, "X\nY\nZ").unwrap();
        assert_eq!(buf.lines(), &["abcX", "Y", "Zdef"]);
        let joined: String = buf.lines().concat();
        assert_eq!(joined.len(), "abcdef".len() + 3);
    }

    #[test]
    fn insert_trailing_break_leaves_remainder_on_new_line() {
        let mut buf = buffer(&["head", "tail"]);
        buf.insert(1, 3, "\n").unwrap();
        assert_eq!(buf.lines(), &["he", "ad", "tail"]);
    }

    #[test]
    fn insert_counts_chars_not_bytes() {
        let mut buf = buffer(&["héllo"]);
        buf.insert(1, 3, "-").unwrap();
        assert_eq!(buf.get_line(1).unwrap(), "hé-llo");
        assert_eq!(buf.line_len(1).unwrap(), 6);
    }

    #[test]
    fn delete_within_line() {
        let mut buf = buffer(&["Hello World"]);
        let removed = buf.delete(1, 6, 6).unwrap();
        assert_eq!(removed, Deleted::Text(" World".into()));
        assert_eq!(buf.get_line(1).unwrap(), "Hello");
    }

    #[test]
    fn delete_zero_length_is_noop() {
        let mut buf = buffer(&[""]);
        assert_eq!(buf.delete(1, 1, 0).unwrap(), Deleted::Nothing);
        assert_eq!(buf.size(), 1);
        assert_eq!(buf.get_line(1).unwrap(), "");

        let mut buf = buffer(&["abc"]);
        assert_eq!(buf.delete(1, 4, 0).unwrap(), Deleted::Nothing);
        assert!(buf.delete(1, 5, 0).is_err());
        assert_eq!(buf.get_line(1).unwrap(), "abc");
    }

    #[test]
    fn delete_on_empty_line_removes_line() {
        let mut buf = buffer(&[""]);
        assert_eq!(buf.delete(1, 1, 1).unwrap(), Deleted::Line);
        assert_eq!(buf.size(), 0);
    }

    #[test]
    fn delete_on_empty_line_requires_column_one() {
        let mut buf = buffer(&["a", ""]);
        assert!(buf.delete(2, 2, 1).is_err());
        assert_eq!(buf.size(), 2);
    }

    #[test]
    fn delete_cannot_cross_line_end() {
        let mut buf = buffer(&["abc", "def"]);
        assert!(matches!(
            buf.delete(1, 2, 3),
            Err(EditorError::OutOfRange(RangeError::Length {
                col: 2,
                length: 3,
                line_len: 3
            }))
        ));
        assert!(buf.delete(1, 4, 1).is_err());
        assert_eq!(buf.lines(), &["abc", "def"]);
    }

    #[test]
    fn delete_with_huge_length_does_not_overflow() {
        let mut buf = buffer(&["abc"]);
        assert!(buf.delete(1, 2, usize::MAX).is_err());
    }

    #[test]
    fn insert_then_delete_same_span_restores_content() {
        let mut buf = buffer(&["alpha beta"]);
        buf.insert(1, 6, " gamma").unwrap();
        buf.delete(1, 6, 6).unwrap();
        assert_eq!(buf.lines(), &["alpha beta"]);
    }

    #[test]
    fn remove_last_lines_checks_count() {
        let mut buf = buffer(&["a", "b", "c"]);
        buf.remove_last_lines(2).unwrap();
        assert_eq!(buf.lines(), &["a"]);
        assert!(buf.remove_last_lines(2).is_err());
        assert_eq!(buf.size(), 1);
    }

    #[test]
    fn insert_line_accepts_one_past_end() {
        let mut buf = buffer(&["a"]);
        buf.insert_line(2, "b").unwrap();
        buf.insert_line(1, "").unwrap();
        assert_eq!(buf.lines(), &["", "a", "b"]);
        assert!(buf.insert_line(5, "x").is_err());
    }

    #[test]
    fn remove_span_across_lines_joins_ends() {
        let mut buf = buffer(&["abcX", "Y", "Zdef"]);
        let removed = buf.remove_span(1, 4, 3, 2).unwrap();
        assert_eq!(removed, "X\nY\nZ");
        assert_eq!(buf.lines(), &["abcdef"]);
    }

    #[test]
    fn remove_span_on_one_line() {
        let mut buf = buffer(&["abcdef"]);
        assert_eq!(buf.remove_span(1, 2, 1, 4).unwrap(), "bc");
        assert_eq!(buf.lines(), &["adef"]);
        assert!(buf.remove_span(1, 3, 1, 2).is_err());
    }

    #[test]
    fn display_joins_lines() {
        assert_eq!(buffer(&["a", "", "b"]).to_string(), "a\n\nb");
    }
}
