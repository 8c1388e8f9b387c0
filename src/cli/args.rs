//! CLI argument definitions using clap derive

use crate::config::Overrides;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// statcard - GitHub activity stats card
///
/// Collects commit and language statistics for a GitHub account, caches
/// them per repository, and renders a console-themed SVG card.
#[derive(Parser, Debug)]
#[command(name = "statcard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STATCARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format (defaults to the config file setting)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch statistics, update the cache and write the SVG card
    Generate(GenerateArgs),

    /// Inspect or delete the statistics cache
    Cache(CacheArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse the `general.log_format` config value; anything unknown is text
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Arguments for the generate command
#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    /// GitHub login to summarise
    #[arg(short, long, env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// GitHub API token
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Salt mixed into repository fingerprints
    #[arg(long, env = "SALT", hide_env_values = true)]
    pub salt: Option<String>,

    /// Discard the existing cache before reconciling
    #[arg(
        long,
        env = "FLUSH_CACHE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub flush_cache: bool,

    /// Cache file path
    #[arg(long, env = "CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Output SVG path
    #[arg(short, long, env = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

impl From<GenerateArgs> for Overrides {
    fn from(args: GenerateArgs) -> Self {
        Self {
            username: args.username,
            token: args.token,
            salt: args.salt,
            flush_cache: args.flush_cache,
            cache_path: args.cache_file,
            output_path: args.output,
        }
    }
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Cache file path
    #[arg(long, global = true, env = "CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cached repositories and totals
    Info,

    /// Delete the cache file
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
