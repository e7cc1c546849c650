//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing default config file is not an error; the client starts with
//! compiled defaults. A config file named explicitly (command line or
//! `PRIORIFY_CONFIG`) must exist and parse.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::completion::CompletionRule;
use crate::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_URL: &str = "PRIORIFY_API_URL";
pub const ENV_API_TOKEN: &str = "PRIORIFY_API_TOKEN";
pub const ENV_LOG_LEVEL: &str = "PRIORIFY_LOG_LEVEL";
pub const ENV_CONFIG: &str = "PRIORIFY_CONFIG";

/// On-disk configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Backend base URL
    #[serde(default)]
    pub api_url: Option<String>,
    /// Bearer token sent as `Authorization` header
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub completion: Option<CompletionRule>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing level or filter directive ("debug", "priorify_client=trace")
    #[serde(default)]
    pub level: Option<String>,
}

/// Fully resolved client settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub completion_rule: CompletionRule,
    pub log_level: String,
    /// Problems that fell back to defaults during resolution
    ///
    /// Resolution usually runs before a tracing subscriber exists, so the
    /// caller logs these once logging is up.
    pub warnings: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            completion_rule: CompletionRule::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// Resolves [`ClientConfig`] from command line, environment, file and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    api_url: Option<String>,
    log_level: Option<String>,
    config_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command-line `--api-url`
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        self.api_url = api_url;
        self
    }

    /// Command-line `--log-level`
    pub fn with_log_level(mut self, log_level: Option<String>) -> Self {
        self.log_level = log_level;
        self
    }

    /// Command-line `--config`
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut warnings = Vec::new();
        let file = self.load_file(&mut warnings)?;

        let api_url = self
            .api_url
            .clone()
            .or_else(|| env_var(ENV_API_URL))
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = validate_api_url(&api_url)?;

        let api_token = env_var(ENV_API_TOKEN)
            .or(file.api_token)
            .filter(|t| !t.trim().is_empty());

        let timeout_secs = file.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be greater than 0".to_string()));
        }

        let completion_rule = file.completion.unwrap_or_default();
        if let CompletionRule::Exactly { count: 0 } = completion_rule {
            return Err(Error::Config("completion count must be at least 1".to_string()));
        }

        let log_level = self
            .log_level
            .clone()
            .or_else(|| env_var(ENV_LOG_LEVEL))
            .or(file.logging.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(ClientConfig {
            api_url,
            api_token,
            request_timeout: Duration::from_secs(timeout_secs),
            completion_rule,
            log_level,
            warnings,
        })
    }

    fn load_file(&self, warnings: &mut Vec<String>) -> Result<TomlConfig> {
        // Explicit paths must be readable
        if let Some(path) = self.config_path.clone().or_else(|| env_var(ENV_CONFIG).map(PathBuf::from)) {
            return load_toml_config(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => match load_toml_config(&path) {
                Ok(config) => Ok(config),
                Err(e) => {
                    warnings.push(format!(
                        "Ignoring unreadable config file {}: {}",
                        path.display(),
                        e
                    ));
                    Ok(TomlConfig::default())
                }
            },
            _ => {
                debug!("No config file found, using defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;

    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;

    debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Platform config location: `<config_dir>/priorify/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("priorify").join("config.toml"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_api_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Config(format!("api_url must be an http(s) URL: {}", url)));
    }
    Ok(url.to_string())
}
