//! Configuration management for statcard
//!
//! The TOML file carries durable preferences; per-run switches (token, salt,
//! cache flush) come from the environment through the CLI and win over it.

pub mod schema;

pub use schema::Config;

use crate::cache::Policy;
use crate::error::{StatcardError, StatcardResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statcard")
            .join("config.toml")
    }

    /// Get the default cache document path
    pub fn default_cache_path() -> PathBuf {
        dirs::cache_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statcard")
            .join("cache.json")
    }

    /// Load configuration, falling back to defaults if not present
    pub async fn load(&self) -> StatcardResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> StatcardResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| StatcardError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| StatcardError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> StatcardResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StatcardError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            StatcardError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub token: Option<String>,
    pub salt: Option<String>,
    pub flush_cache: bool,
    pub cache_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

/// Fully resolved settings for one `generate` run
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: String,
    pub token: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub listing_page_size: u32,
    pub history_page_size: u32,
    pub languages_per_repo: u32,
    pub salt: String,
    pub flush_cache: bool,
    pub cache_path: PathBuf,
    pub output_path: PathBuf,
    pub policy: Policy,
}

impl Settings {
    /// Merge file configuration with overrides.
    ///
    /// Username and token are required; an absent salt is the empty string.
    pub fn resolve(config: &Config, overrides: Overrides) -> StatcardResult<Self> {
        let username = overrides
            .username
            .or_else(|| config.github.username.clone())
            .filter(|u| !u.trim().is_empty())
            .ok_or(StatcardError::MissingSetting { name: "username" })?;

        let token = overrides
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(StatcardError::MissingSetting { name: "token" })?;

        Ok(Self {
            username,
            token,
            endpoint: config.github.endpoint.clone(),
            timeout: Duration::from_secs(config.github.timeout_secs),
            listing_page_size: config.github.listing_page_size,
            history_page_size: config.github.history_page_size,
            languages_per_repo: config.github.languages_per_repo,
            salt: overrides.salt.unwrap_or_default(),
            flush_cache: overrides.flush_cache,
            cache_path: resolve_cache_path(config, overrides.cache_path),
            output_path: overrides
                .output_path
                .unwrap_or_else(|| config.output.path.clone()),
            policy: config.policy.clone(),
        })
    }
}

/// Cache path precedence: override, then config file, then the user cache dir.
pub fn resolve_cache_path(config: &Config, cache_override: Option<PathBuf>) -> PathBuf {
    cache_override
        .or_else(|| config.cache.path.clone())
        .unwrap_or_else(ConfigManager::default_cache_path)
}
