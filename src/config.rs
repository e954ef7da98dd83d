//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `GUESTBOOK_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::guestbook::MalformedPolicy;
use crate::render::RenderPolicy;
use crate::store::DEFAULT_FILE_NAME;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static/` (the compiled widget lives here)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Entry storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// `reset` treats unparsable stored entries as empty, `fail` reports them
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("guestbook").to_string_lossy().to_string())
        .unwrap_or_else(|| "./guestbook_data".to_string())
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl StorageConfig {
    /// Storage rooted at `data_dir` with default settings otherwise
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        }
    }

    /// Full path of the key-value file
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.file_name)
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Insert stored markup unescaped
    #[serde(default)]
    pub raw_html: bool,
}

impl RenderConfig {
    pub fn policy(&self) -> RenderPolicy {
        RenderPolicy::from_raw_flag(self.raw_html)
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
            dirs::config_dir().map(|p| p.join("guestbook").join("config.toml")),
            Some(PathBuf::from("/etc/guestbook/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable lookup
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = var("GUESTBOOK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("GUESTBOOK_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(dir) = var("GUESTBOOK_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // Storage overrides
        if let Some(data_dir) = var("GUESTBOOK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(policy) = var("GUESTBOOK_ON_MALFORMED") {
            match policy.to_lowercase().as_str() {
                "reset" => self.storage.on_malformed = MalformedPolicy::Reset,
                "fail" => self.storage.on_malformed = MalformedPolicy::Fail,
                other => tracing::warn!("Ignoring GUESTBOOK_ON_MALFORMED={}", other),
            }
        }

        // Render overrides
        if let Some(raw) = var("GUESTBOOK_RAW_HTML") {
            self.render.raw_html = raw.to_lowercase() == "true" || raw == "1";
        }

        // Logging overrides
        if let Some(level) = var("GUESTBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("GUESTBOOK_LOG_FORMAT") {
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Guestbook Configuration
#
# Environment variables override these settings:
# - GUESTBOOK_HOST
# - GUESTBOOK_PORT
# - GUESTBOOK_STATIC_DIR
# - GUESTBOOK_DATA_DIR
# - GUESTBOOK_ON_MALFORMED
# - GUESTBOOK_RAW_HTML
# - GUESTBOOK_LOG_LEVEL
# - GUESTBOOK_LOG_FORMAT

[server]
# Host to bind to
host = "0.0.0.0"

# Port to listen on
port = 8080

# Directory served under /static/ (put the built guestbook-ui bundle here)
static_dir = "static"

[storage]
# Directory holding the entry file
data_dir = "~/.local/share/guestbook"

# Key-value file name inside data_dir
file_name = "local_storage.json"

# What to do with unparsable stored entries: reset (treat as empty) or fail
on_malformed = "reset"

[render]
# Insert stored markup without escaping. Only enable for trusted, single-user guestbooks.
raw_html = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
