//! Configuration management.
//!
//! Settings come from, in increasing precedence: built-in defaults, a TOML
//! file, and environment variables prefixed with `MODRINTH` (nested keys are
//! separated by `__`, e.g. `MODRINTH_API__BASE_URL`).
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "https://api.modrinth.com"
//! user_agent = "my-launcher/1.0"
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! token = "mrp_..."
//!
//! [search]
//! max_concurrent_requests = 8
//! default_limit = 10
//!
//! [downloads]
//! default_path = "./downloads"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::gateway::AuthToken;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.modrinth.com";

/// File name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "modrinth.toml";

/// Environment variable holding an API token
pub const TOKEN_ENV_VAR: &str = "MODRINTH_TOKEN";

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Download settings
    #[serde(default)]
    pub downloads: DownloadConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API endpoint configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Opaque token for authorized endpoints
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            token: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiConfig {
    /// The configured token, falling back to `MODRINTH_TOKEN`
    pub fn auth_token(&self) -> Option<Result<AuthToken>> {
        self.token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .map(AuthToken::new)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum hits resolved concurrently
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,

    /// Page size used when the caller gives none
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent(),
            default_limit: default_limit(),
        }
    }
}

fn default_max_concurrent() -> usize {
    8
}

fn default_limit() -> usize {
    10
}

/// Download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Default download directory
    #[serde(default = "default_download_dir")]
    pub default_path: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            default_path: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` for structured output, anything else for plain text
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Whether JSON log lines were requested
    pub fn is_json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, layered with `MODRINTH_*` variables
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::Io(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("MODRINTH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("modrinth-client").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
