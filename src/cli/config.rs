use anyhow::Result;
use console::style;
use propdash_core::config::PropdashConfig;

use super::CommandContext;

/// Handle the config command
pub fn handle_config_command(context: &CommandContext, init: bool, force: bool) -> Result<()> {
    if init {
        let created = PropdashConfig::bootstrap_project(context.workspace(), force)?;
        if created.is_empty() {
            println!(
                "{} already exists in {} (use --force to overwrite)",
                style("propdash.toml").bold(),
                context.workspace().display()
            );
        } else {
            for file in created {
                println!("{} {file}", style("Created").green().bold());
            }
        }
        return Ok(());
    }

    match context.config_path() {
        Some(path) => println!("{} {}", style("# Loaded from").dim(), path.display()),
        None => println!("{}", style("# Using built-in defaults").dim()),
    }
    println!("{} {}", style("# API base:").dim(), context.api_base());
    println!("{} {}", style("# State dir:").dim(), context.state_dir().display());
    println!("{}", context.config().to_toml()?);
    Ok(())
}
