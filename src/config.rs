//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\curator\config.toml
//! - macOS: ~/Library/Application Support/curator/config.toml
//! - Linux: ~/.config/curator/config.toml
//!
//! A handful of environment variables override the file so the server can
//! be configured the twelve-factor way (`HARVARD_API_KEY`,
//! `SMITHSONIAN_API_KEY`, `JWT_SECRET`, `DATABASE_PATH`, `PORT`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Museum API credentials
    pub credentials: Credentials,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Database settings
    pub database: DatabaseConfig,

    /// Response cache settings
    pub cache: CacheConfig,

    /// Search aggregation settings
    pub aggregator: AggregatorConfig,

    /// Outbound HTTP settings
    pub http: HttpConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Harvard Art Museums API key (https://harvardartmuseums.org/collections/api)
    pub harvard_api_key: Option<String>,

    /// Smithsonian Open Access key from api.data.gov
    pub smithsonian_api_key: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,

    /// HS256 signing secret for session tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            jwt_secret: "change-me".to_string(),
            token_ttl_secs: 3600,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_dir()
                .map(|d| d.join("curator").join("curator.db"))
                .unwrap_or_else(|| PathBuf::from("curator.db")),
        }
    }
}

impl DatabaseConfig {
    /// sqlx connection URL for the configured file
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Search aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Consecutive empty rounds before a search gives up
    pub max_attempts: u32,

    /// Page size when the client sends none (or garbage)
    pub default_page_size: usize,

    /// Upper bound on a client-requested page size
    pub max_page_size: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Apply environment overrides using the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a variable lookup. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("HARVARD_API_KEY") {
            self.credentials.harvard_api_key = Some(key);
        }
        if let Some(key) = get("SMITHSONIAN_API_KEY") {
            self.credentials.smithsonian_api_key = Some(key);
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.server.jwt_secret = secret;
        }
        if let Some(path) = get("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(port) = get("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.bind = replace_port(&self.server.bind, port),
                Err(_) => tracing::warn!("Ignoring invalid PORT value {:?}", port),
            }
        }
    }
}

/// Swap the port of a `host:port` bind address.
fn replace_port(bind: &str, port: u16) -> String {
    let host = bind
        .rsplit_once(':')
        .map(|(host, _)| host)
        .filter(|h| !h.is_empty())
        .unwrap_or("0.0.0.0");
    format!("{}:{}", host, port)
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("curator"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location, then apply the environment.
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let mut config = match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    };
    config.apply_env();
    config
}

/// Load configuration from an explicit file, then apply the environment.
pub fn load_with_override(path: Option<&Path>) -> Config {
    match path {
        Some(path) => {
            let mut config = load_from(path);
            config.apply_env();
            config
        }
        None => load(),
    }
}

/// Load a config file without environment overrides
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[aggregator]"));
        assert!(toml.contains("[http]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[credentials]
harvard_api_key = "my-key"

[cache]
ttl_secs = 60
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.harvard_api_key, Some("my-key".to_string()));
        assert_eq!(config.credentials.smithsonian_api_key, None);
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert_eq!(config.aggregator.max_attempts, 5);
        assert_eq!(config.aggregator.default_page_size, 20);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.server.token_ttl_secs, 3600);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HARVARD_API_KEY", "h-key"),
            ("SMITHSONIAN_API_KEY", "s-key"),
            ("JWT_SECRET", "sekrit"),
            ("DATABASE_PATH", "/tmp/x.db"),
            ("PORT", "8080"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.credentials.harvard_api_key.as_deref(), Some("h-key"));
        assert_eq!(config.credentials.smithsonian_api_key.as_deref(), Some("s-key"));
        assert_eq!(config.server.jwt_secret, "sekrit");
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_and_blank_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "PORT" => Some("not-a-port".into()),
            "JWT_SECRET" => Some("   ".into()),
            _ => None,
        });

        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.server.jwt_secret, "change-me");
    }

    #[test]
    fn test_replace_port() {
        assert_eq!(replace_port("127.0.0.1:5000", 9000), "127.0.0.1:9000");
        assert_eq!(replace_port("garbage", 9000), "0.0.0.0:9000");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.credentials.smithsonian_api_key = Some("abc".into());
        config.aggregator.max_page_size = 50;
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded.credentials.smithsonian_api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.aggregator.max_page_size, 50);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [not toml").unwrap();

        let config = load_from(&path);
        assert_eq!(config.server.bind, "0.0.0.0:5000");
    }
}
