//! Configuration view and bootstrap — `taskdeck config`.

use anyhow::{Context, Result};
use console::style;

use super::super::ConfigCommands;
use taskdeck::config::{Config, DEFAULT_CONFIG_TEMPLATE};

pub fn cmd_config(config: &Config, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("taskdeck configuration");
            println!("======================");
            println!();
            println!("  API URL      {}", style(&config.api_url).cyan());
            println!("  Log filter   {}", config.log_filter);
            if config.config_path.exists() {
                println!("  Config file  {}", config.config_path.display());
            } else {
                println!(
                    "  Config file  {} {}",
                    config.config_path.display(),
                    style("(not found, using defaults)").dim()
                );
            }
            println!();
            println!(
                "  Overrides: {} flag, {}, {}",
                style("--api-url").yellow(),
                style("TASKDECK_API_URL").yellow(),
                style("TASKDECK_LOG").yellow()
            );
        }
        Some(ConfigCommands::Init { force }) => {
            let path = &config.config_path;
            if path.exists() && !force {
                let overwrite = dialoguer::Confirm::new()
                    .with_prompt(format!("{} already exists. Overwrite?", path.display()))
                    .default(false)
                    .interact()?;
                if !overwrite {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
