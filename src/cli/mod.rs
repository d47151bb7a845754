//! Command-line front end for tunedeck.
//!
//! Stands in for the desktop window: each subcommand maps to one user
//! action (add, remove, scan, select, play, edit) and calls into the core.

mod commands;

pub use commands::{Cli, Commands, run_command};
