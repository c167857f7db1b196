//! # linedit
//!
//! Interactive front end for the linedit library. Commands are read from stdin one per
//! line; see the `cli` module for the session lifecycle and `help` at the prompt for the
//! command list.
//!
//! All editing behavior lives in the library. This binary only parses input, prints
//! results and decides exit codes: a failing command reports `Error: ...` and the loop
//! continues, while a start-up failure exits with status 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
