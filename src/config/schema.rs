//! Configuration schema for statcard
//!
//! Configuration is stored at `~/.config/statcard/config.toml`

use crate::cache::Policy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// GitHub API settings
    pub github: GithubConfig,

    /// Cache file settings
    pub cache: CacheConfig,

    /// Rendered card settings
    pub output: OutputConfig,

    /// Fork cutoff and language accounting rules
    pub policy: Policy,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// GitHub API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Login whose activity is summarised
    pub username: Option<String>,

    /// GraphQL endpoint (override for GitHub Enterprise)
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Repositories and organizations per listing page
    pub listing_page_size: u32,

    /// Commits per history page
    pub history_page_size: u32,

    /// Languages requested per repository
    pub languages_per_repo: u32,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: None,
            endpoint: "https://api.github.com/graphql".to_string(),
            timeout_secs: 30,
            listing_page_size: 60,
            history_page_size: 100,
            languages_per_repo: 10,
        }
    }
}

/// Cache file settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache document path (defaults to the user cache directory)
    pub path: Option<PathBuf>,
}

/// Rendered card settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the SVG card is written
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("generated").join("cover.svg"),
        }
    }
}
