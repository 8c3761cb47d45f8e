//! Command-line interface for curator.
//!
//! Runs the REST API by default; the other commands query the museums,
//! seed a database or inspect configuration without starting a server.

mod commands;

pub use commands::{Cli, Commands, run_command};
