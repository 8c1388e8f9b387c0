//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::StatcardResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> StatcardResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => {
            init_config(&UiContext::detect(), manager, force).await?
        }
    }
    Ok(())
}

fn show_config(config: &Config) -> StatcardResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(ctx: &UiContext, manager: &ConfigManager, force: bool) -> StatcardResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn(ctx, &format!("Config already exists at {}", path.display()));
        ui::remark(ctx, "Use --force to overwrite");
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok(ctx, &format!("Configuration written to {}", path.display()));
    Ok(())
}
