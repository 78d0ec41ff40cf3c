use anyhow::Result;
use console::style;

use super::CommandContext;

/// Handle the recent command
pub fn handle_recent_command(context: &CommandContext, clear: bool) -> Result<()> {
    let mut recent = context.recent_store();

    if clear {
        recent.clear();
        println!("{}", style("Recent selections cleared").green());
        return Ok(());
    }

    let entries = recent.load();
    if entries.is_empty() {
        println!("{}", style("No recent selections").dim());
        return Ok(());
    }
    for (index, player) in entries.iter().enumerate() {
        println!(
            "{:>2}. {}  {}",
            index + 1,
            style(&player.full_name).bold(),
            style(player.caption()).dim()
        );
    }
    Ok(())
}
