use anyhow::Result;
use console::style;
use propdash_core::models::{Pricing, PropLeg};

use super::CommandContext;

/// Handle the price command
pub async fn handle_price_command(
    context: &CommandContext,
    legs: &[PropLeg],
    samples: Option<u32>,
) -> Result<()> {
    let pricing = context.pricing_client(samples).price(legs).await?;

    match &pricing {
        Pricing::Single(single) => {
            println!(
                "{} {}  {}",
                style("Single Leg Probability:").cyan().bold(),
                percent(single.probability),
                style(format!("n={}", single.sample_size)).dim()
            );
        }
        Pricing::Parlay(parlay) => {
            println!(
                "{} {}  {}",
                style("Joint Probability:").cyan().bold(),
                percent(parlay.joint_probability),
                style(format!("sample_size={}", parlay.sample_size)).dim()
            );
            for (index, (leg, marginal)) in legs.iter().zip(&parlay.per_leg).enumerate() {
                println!(
                    "  Leg {}  {leg}  {}",
                    index + 1,
                    percent(marginal.marginal)
                );
            }
            if !parlay.kendall_tau.is_empty() {
                println!("{}", style("Kendall tau").dim());
                for row in &parlay.kendall_tau {
                    let cells: Vec<String> = row.iter().map(|value| format!("{value:>6.2}")).collect();
                    println!("  {}", cells.join(" "));
                }
            }
        }
    }
    Ok(())
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
