use anyhow::{Result, bail};
use console::style;
use propdash_core::api::{SearchProvider, SearchRequest};
use propdash_core::search::eligible_query;

use super::CommandContext;

/// Handle the search command
pub async fn handle_search_command(
    context: &CommandContext,
    query: &str,
    limit: Option<usize>,
) -> Result<()> {
    let options = context.search_options();
    let Some(query) = eligible_query(query, options.min_query_chars) else {
        bail!(
            "query must have at least {} characters",
            options.min_query_chars
        );
    };

    let request = SearchRequest::new(query, limit.unwrap_or(options.limit));
    let players = context.search_provider().search(&request).await?;

    if players.is_empty() {
        println!("{}", style("No results").dim());
        return Ok(());
    }

    for player in &players {
        println!(
            "{}  {}",
            style(&player.full_name).bold(),
            style(player.caption()).dim()
        );
    }
    Ok(())
}
