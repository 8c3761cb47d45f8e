//! Config inspection command.

use std::path::Path;

use crate::config::{self, Config};

const REDACTED: &str = "<redacted>";

/// Print the effective configuration with secrets masked
pub fn cmd_config(config: &Config, override_path: Option<&Path>, path_only: bool) -> anyhow::Result<()> {
    let location = override_path
        .map(Path::to_path_buf)
        .or_else(config::config_path);

    if path_only {
        match location {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory)"),
        }
        return Ok(());
    }

    if let Some(path) = &location {
        println!("# {}", path.display());
    }
    println!("{}", toml::to_string_pretty(&redacted(config))?);
    Ok(())
}

fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    let mask = |key: &mut Option<String>| {
        if key.is_some() {
            *key = Some(REDACTED.to_string());
        }
    };
    mask(&mut shown.credentials.harvard_api_key);
    mask(&mut shown.credentials.smithsonian_api_key);
    shown.server.jwt_secret = REDACTED.to_string();
    shown
}
