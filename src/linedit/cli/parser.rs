//! Splits a prompt line into a command name and its arguments.
//!
//! Tokens are separated by whitespace. A double-quoted run is a single token with the
//! quotes removed, and may be empty (`""`). Inside quotes `\n` is a line break, `\"` a
//! quote and `\\` a backslash; any other backslash is kept as written.

use linedit::error::{EditorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command name.
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<ParsedCommand>> {
    let mut tokens = tokenize(line)?.into_iter();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    Ok(Some(ParsedCommand {
        name: name.to_lowercase(),
        args: tokens.collect(),
    }))
}

pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut token = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.peek() {
                        Some('n') => {
                            chars.next();
                            token.push('\n');
                        }
                        Some('"') => {
                            chars.next();
                            token.push('"');
                        }
                        Some('\\') => {
                            chars.next();
                            token.push('\\');
                        }
                        _ => token.push('\\'),
                    },
                    other => token.push(other),
                }
            }
            if !closed {
                return Err(EditorError::Parse("unterminated quote".to_string()));
            }
            tokens.push(token);
            continue;
        }

        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            token.push(c);
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}
