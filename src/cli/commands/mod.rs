//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for curator.
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `serve`: Run the REST API (the default)
//! - `exhibits`: One-off search and lookup against the museum APIs
//! - `seed`: Populate a database with demo users and collections
//! - `config`: Show the effective configuration

mod config;
mod exhibits;
mod seed;
mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::cmd_config;
pub use exhibits::{cmd_search, cmd_show};
pub use seed::cmd_seed;
pub use serve::cmd_serve;

/// Curator - one API over the Harvard and Smithsonian collections
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen address (overrides config and PORT)
        #[arg(long)]
        bind: Option<String>,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Search both museums and print one page of results
    Search {
        /// Free-text query
        #[arg(default_value = "")]
        query: String,
        /// 1-based page
        #[arg(long, default_value = "1")]
        page: u32,
        /// Results wanted
        #[arg(long, default_value = "10")]
        page_size: usize,
        /// Object type, e.g. "Paintings"
        #[arg(long)]
        collection: Option<String>,
        /// Culture or country
        #[arg(long)]
        culture: Option<String>,
        /// Medium or material
        #[arg(long)]
        medium: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one exhibit by composite id, e.g. harvard-299843
    Show {
        id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Create demo users and collections
    Seed {
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
    },
}

/// Run the specified CLI command, or the server when none is given.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = crate::config::load_with_override(cli.config.as_deref());

    match &cli.command {
        None => cmd_serve(&rt, &config, None, None),
        Some(Commands::Serve { bind, db }) => {
            cmd_serve(&rt, &config, bind.as_deref(), db.as_deref())
        }
        Some(Commands::Search {
            query,
            page,
            page_size,
            collection,
            culture,
            medium,
            json,
        }) => {
            let filters = crate::exhibits::SearchFilters::new(
                collection.clone(),
                culture.clone(),
                medium.clone(),
            );
            cmd_search(&rt, &config, query, *page, *page_size, &filters, *json)
        }
        Some(Commands::Show { id, json }) => cmd_show(&rt, &config, id, *json),
        Some(Commands::Seed { db }) => cmd_seed(&rt, &config, db.as_deref()),
        Some(Commands::Config { path }) => cmd_config(&config, cli.config.as_deref(), *path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["curator"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "curator",
            "search",
            "vase",
            "--page-size",
            "5",
            "--culture",
            "Greek",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Search {
                query,
                page,
                page_size,
                culture,
                json,
                ..
            }) => {
                assert_eq!(query, "vase");
                assert_eq!(page, 1);
                assert_eq!(page_size, 5);
                assert_eq!(culture.as_deref(), Some("Greek"));
                assert!(json);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["curator", "show", "harvard-1", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
