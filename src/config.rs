//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$ENRONSCAN_CONFIG` (environment variable)
//! 2. `~/.config/enronscan/config.toml` (Linux/macOS)
//!    `%APPDATA%\enronscan\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Ingestion settings.
    pub ingest: IngestConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path. Defaults to `enron.sqlite` in the working
    /// directory when unset and no `--db` flag is given.
    pub db_path: Option<PathBuf>,
}

/// Ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// File extension (without dot) selecting corpus files.
    pub extension: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { db_path: None }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
        }
    }
}

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("ENRONSCAN_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("enronscan").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("enronscan")
}

/// Resolve the database path: `--db` flag, then config, then `./enron.sqlite`.
pub fn db_path(config: &Config, cli_override: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = cli_override {
        return path.clone();
    }
    config
        .storage
        .db_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("enron.sqlite"))
}
