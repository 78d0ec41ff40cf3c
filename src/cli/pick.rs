use std::sync::Arc;

use anyhow::Result;
use console::style;
use propdash_core::search::SearchController;
use propdash_core::ui::tui::{PickerTheme, run_picker};

use super::CommandContext;

/// Handle the pick command: run the interactive picker, then print the slip.
pub async fn handle_pick_command(context: &CommandContext, auto_focus: bool) -> Result<()> {
    let mut options = context.search_options();
    options.auto_focus |= auto_focus;

    tracing::info!(api = context.api_base(), "starting player picker");
    let search = SearchController::new(
        options,
        Arc::new(context.search_provider()),
        Box::new(context.store()),
    );

    let slip = match run_picker(search, context.pricing_client(None), PickerTheme::default()).await
    {
        Ok(slip) => slip,
        Err(error) => {
            tracing::error!(error = ?error, "player picker terminated unexpectedly");
            return Err(error);
        }
    };

    if let Some(player) = slip.selected() {
        println!(
            "{} {}  {}",
            style("Selected:").cyan().bold(),
            player.full_name,
            style(player.caption()).dim()
        );
    }
    if !slip.legs().is_empty() {
        println!("{} {}", style("Legs:").cyan().bold(), slip.summary());
    }
    if let Some(pricing) = slip.pricing() {
        println!(
            "{} {:.1}%",
            style("Probability:").cyan().bold(),
            pricing.probability() * 100.0
        );
    }
    Ok(())
}
