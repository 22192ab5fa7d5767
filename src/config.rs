//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::data::{DataSource, FranchiseEntry, FranchiseTable};
use crate::query::DEFAULT_LIMIT;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Replaces the built-in franchise table when non-empty
    #[serde(default)]
    pub franchises: Vec<FranchiseEntry>,
}

/// Input file locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_matches_path")]
    pub matches_path: String,

    #[serde(default = "default_deliveries_path")]
    pub deliveries_path: String,
}

fn default_matches_path() -> String {
    "matches_cleaned.csv".to_string()
}

fn default_deliveries_path() -> String {
    "deliveries_cleaned.csv".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            matches_path: default_matches_path(),
            deliveries_path: default_deliveries_path(),
        }
    }
}

impl DataConfig {
    pub fn source(&self) -> DataSource {
        DataSource::new(&self.matches_path, &self.deliveries_path)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Leaderboard size when a request does not give one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound on requested leaderboard sizes
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_max_limit() -> usize {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ipl-insights").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Franchise table to normalize team names with
    pub fn franchise_table(&self) -> FranchiseTable {
        if self.franchises.is_empty() {
            FranchiseTable::builtin()
        } else {
            FranchiseTable::new(self.franchises.clone())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.default_limit == 0 {
            return Err(ConfigError::Invalid(
                "api.default_limit must be at least 1".to_string(),
            ));
        }
        if self.api.max_limit < self.api.default_limit {
            return Err(ConfigError::Invalid(
                "api.max_limit must not be below api.default_limit".to_string(),
            ));
        }
        for entry in &self.franchises {
            if entry.canonical.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "franchise entries need a canonical name".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Data overrides
        if let Some(path) = var("IPL_MATCHES_PATH") {
            self.data.matches_path = path;
        }
        if let Some(path) = var("IPL_DELIVERIES_PATH") {
            self.data.deliveries_path = path;
        }

        // API overrides
        if let Some(host) = var("IPL_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("IPL_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid IPL_API_PORT: {}", port),
            }
        }

        // Logging overrides
        if let Some(level) = var("IPL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("IPL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# IPL Insights Configuration
#
# Environment variables override these settings:
# - IPL_MATCHES_PATH
# - IPL_DELIVERIES_PATH
# - IPL_API_HOST
# - IPL_API_PORT
# - IPL_LOG_LEVEL
# - IPL_LOG_FORMAT

[data]
# Match table: one row per game
matches_path = "matches_cleaned.csv"

# Delivery table: one row per ball
deliveries_path = "deliveries_cleaned.csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Leaderboard size when a request does not specify one
default_limit = 10

# Largest leaderboard a request may ask for
max_limit = 100

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Franchise history. Leave commented out to use the built-in table.
# Each entry maps historical names to one canonical name and lists the
# seasons it played; an entry without `end` is still active.
#
# [[franchises]]
# canonical = "Delhi Daredevils (2008-2018)"
# aliases = ["Delhi Daredevils"]
# active = [{ start = 2008, end = 2018 }]
#
# [[franchises]]
# canonical = "Chennai Super Kings"
# active = [{ start = 2008, end = 2015 }, { start = 2018 }]
"#
    .to_string()
}
