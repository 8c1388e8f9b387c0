//! statcard CLI entry point

use clap::Parser;
use console::style;
use statcard::cli::args::LogFormat;
use statcard::cli::{Cli, Commands};
use statcard::config::ConfigManager;
use statcard::error::StatcardResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StatcardResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    let format = cli
        .log_format
        .unwrap_or_else(|| LogFormat::from_config(&config.general.log_format));
    init_logging(cli.verbose, format);
    debug!("Using config {}", config_manager.path().display());

    statcard::ui::init_theme();

    match cli.command {
        Commands::Generate(args) => statcard::cli::commands::generate(args, &config).await,
        Commands::Cache(args) => statcard::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            statcard::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; `RUST_LOG` wins when set
fn init_logging(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("statcard=warn"),
        1 => EnvFilter::new("statcard=info"),
        _ => EnvFilter::new("statcard=debug"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.without_time().init(),
    }
}
