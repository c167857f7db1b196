//! # CLI
//!
//! The interactive front end: one client of the library, and the only code that touches
//! the terminal. It reads one command per line from stdin, dispatches it through
//! [`linedit::api::EditorApi`], and prints the resulting messages.
//!
//! ## Session Lifecycle
//!
//! 1. Resolve the data directory (`--home`, `$LINEDIT_HOME`, platform default) and load
//!    `config.json` from it.
//! 2. Restore the workspace snapshot unless `--no-restore` or `restore_on_start = false`.
//! 3. Loop until `exit` or end of input. A failing command prints `Error: ...` to stderr
//!    and the loop continues.
//! 4. On the way out, write the snapshot if `save_state_on_exit` is set.
//!
//! ## Module Structure
//!
//! - `commands`: start-up, the prompt loop and per-command dispatch
//! - `parser`: splitting an input line into a command name and arguments
//! - `render`: colored messages, listings and help text
//! - `setup`: process arguments via clap

mod commands;
mod parser;
mod render;
pub mod setup;

pub use commands::run;
