//! # Linedit Architecture
//!
//! Linedit is a line-oriented, multi-document editing library with exact undo/redo. The
//! `linedit` binary is one client of it; nothing in the library assumes a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Prompt loop, tokenizing, colored output                  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, parses `line:col` and ranges                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Editing Core                                               │
//! │  workspace → session → history → command → buffer           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait, FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits flow down: workspace → session → history → command → buffer. Notifications flow
//! back up: history emits an event per transition, the session fans it out to observers
//! such as the sidecar audit logger.
//!
//! ## Module Overview
//!
//! - [`buffer`]: the line store and its 1-based addressing rules
//! - [`command`]: reversible Append / Insert / Delete
//! - [`history`]: the undo/redo stacks and their events
//! - [`session`]: one open document with flags and observers
//! - [`workspace`]: open documents by path, and the active one
//! - [`observer`]: observer trait and the sidecar [`observer::FileLogger`]
//! - [`memento`]: workspace snapshot persisted between runs
//! - [`api`], [`commands`], [`store`], [`config`], [`error`]

pub mod api;
pub mod buffer;
pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod memento;
pub mod observer;
pub mod session;
pub mod store;
pub mod workspace;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
