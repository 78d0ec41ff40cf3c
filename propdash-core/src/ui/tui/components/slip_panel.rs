use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::Pricing;
use crate::parlay::ParlaySlip;
use crate::ui::tui::types::PickerTheme;

const KEY_HINTS: &str =
    "^A add leg · ^T prop · PgUp/PgDn threshold · ^G price · ^R reset · ^X change · ^C quit";

/// Selected player, leg builder and pricing outcome.
pub fn render(frame: &mut Frame<'_>, area: Rect, slip: &ParlaySlip, notice: Option<&str>, theme: &PickerTheme) {
    let mut lines = Vec::new();

    let selected = match slip.selected() {
        Some(player) => Line::from(vec![
            Span::styled("Selected: ", theme.muted()),
            Span::styled(player.full_name.clone(), theme.primary()),
            Span::styled(format!(" ({})", player.caption()), theme.muted()),
        ]),
        None => Line::from(Span::styled("Selected: none", theme.muted())),
    };
    lines.push(selected);
    lines.push(Line::from(format!(
        "Prop: {}   Threshold: {}",
        slip.prop(),
        slip.threshold()
    )));
    lines.push(Line::from(format!("Current Legs: {}", slip.summary())));

    if slip.is_busy() {
        lines.push(Line::from(Span::styled("Computing…", theme.muted())));
    } else if let Some(error) = slip.error() {
        lines.push(Line::from(Span::styled(error.to_string(), theme.error())));
    } else if let Some(pricing) = slip.pricing() {
        lines.extend(pricing_lines(pricing, slip, theme));
    }

    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(notice.to_string(), theme.error())));
    }
    lines.push(Line::from(Span::styled(KEY_HINTS, theme.muted())));

    let block = Block::default().borders(Borders::ALL).title("Parlay Builder");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pricing_lines(pricing: &Pricing, slip: &ParlaySlip, theme: &PickerTheme) -> Vec<Line<'static>> {
    match pricing {
        Pricing::Single(single) => vec![Line::from(vec![
            Span::styled("Single Leg Probability: ", theme.muted()),
            Span::styled(percent(single.probability), theme.primary()),
            Span::styled(format!("  n={}", single.sample_size), theme.muted()),
        ])],
        Pricing::Parlay(parlay) => {
            let mut lines = vec![Line::from(vec![
                Span::styled("Joint Probability: ", theme.muted()),
                Span::styled(percent(parlay.joint_probability), theme.primary()),
                Span::styled(format!("  sample_size={}", parlay.sample_size), theme.muted()),
            ])];
            let legs = parlay
                .per_leg
                .iter()
                .enumerate()
                .map(|(index, leg)| {
                    let prop = slip
                        .legs()
                        .get(index)
                        .map(|l| l.prop.to_string())
                        .unwrap_or_default();
                    format!("Leg {} {prop} th≥{}: {}", index + 1, leg.threshold, percent(leg.marginal))
                })
                .collect::<Vec<_>>()
                .join("   ");
            lines.push(Line::from(legs));
            lines
        }
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
