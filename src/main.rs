//! Curator - one REST API over several museum collections.
//!
//! Searches the Harvard Art Museums and the Smithsonian in a single call,
//! normalizes their records into one exhibit shape, and lets registered
//! users keep personal collections of exhibits.

pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod exhibits;
pub mod http;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curator=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    cli::run_command(&args)
}
