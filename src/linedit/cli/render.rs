use colored::Colorize;
use linedit::api::{CmdMessage, CmdResult, DocumentEntry, MessageLevel, NumberedLine};
use unicode_width::UnicodeWidthStr;

const ACTIVE_MARKER: &str = "> ";
const MODIFIED_MARKER: &str = "[modified]";

pub(super) const HELP: &str = "\
Documents:
  load <file>                  open a file (empty if it does not exist)
  init <file> [with-log]       create a new document, optionally audit-logged
  save [file|all]              save the active, named or every document
  close [file]                 close the named or active document
  edit <file>                  switch the active document
  editor-list                  list open documents

Editing (active document):
  append \"text\"                add a line at the end
  insert <line:col> \"text\"     insert text, \\n in quotes starts a new line
  delete <line:col> <len>      delete characters within a line
  replace <line:col> <len> \"text\"
  show [start:end]             print lines with their numbers
  undo / redo

Audit log:
  log-on / log-off             record every edit in .<file>.log
  log-show                     print the audit log

Other:
  dir-tree [dir]               print a directory tree
  help                         this text
  exit                         save the workspace state and quit";

pub(super) fn print_result(result: &CmdResult) {
    for line in render_lines(&result.listed_lines) {
        println!("{}", line);
    }
    for line in render_documents(&result.documents) {
        println!("{}", line);
    }
    for line in &result.text_lines {
        println!("{}", line);
    }
    print_messages(&result.messages);
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", render_message(message));
    }
}

pub(super) fn render_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

pub(super) fn render_lines(lines: &[NumberedLine]) -> Vec<String> {
    lines
        .iter()
        .map(|line| format!("{}: {}", line.number, line.text))
        .collect()
}

/// `> name [modified]` for the active document, names padded so markers line up.
pub(super) fn render_documents(documents: &[DocumentEntry]) -> Vec<String> {
    let width = documents
        .iter()
        .map(|doc| doc.name.width())
        .max()
        .unwrap_or(0);

    documents
        .iter()
        .map(|doc| {
            let marker = if doc.active { ACTIVE_MARKER } else { "  " };
            if doc.modified {
                let padding = " ".repeat(width - doc.name.width());
                format!(
                    "{}{}{} {}",
                    marker,
                    doc.name,
                    padding,
                    MODIFIED_MARKER.yellow()
                )
            } else {
                format!("{}{}", marker, doc.name)
            }
        })
        .collect()
}
