//! Parlay slip built from players chosen in the search widget.

use thiserror::Error;

use crate::config::constants::slip::{DEFAULT_THRESHOLD, THRESHOLD_STEP};
use crate::models::{Player, Pricing, PropLeg, PropName};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlipError {
    #[error("Pick a player first")]
    NoPlayerSelected,
    #[error("Add at least one leg first")]
    Empty,
    #[error("Pricing already in progress")]
    Busy,
}

/// Host-side state around the widget: the player it last committed, the
/// prop being built and the legs collected so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ParlaySlip {
    selected: Option<Player>,
    prop: PropName,
    threshold: f64,
    legs: Vec<PropLeg>,
    pricing: Option<Pricing>,
    error: Option<String>,
    busy: bool,
}

impl Default for ParlaySlip {
    fn default() -> Self {
        Self::new()
    }
}

impl ParlaySlip {
    pub fn new() -> Self {
        Self {
            selected: None,
            prop: PropName::default(),
            threshold: DEFAULT_THRESHOLD,
            legs: Vec::new(),
            pricing: None,
            error: None,
            busy: false,
        }
    }

    pub fn select(&mut self, player: &Player) {
        self.selected = Some(player.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Player> {
        self.selected.as_ref()
    }

    pub fn prop(&self) -> PropName {
        self.prop
    }

    pub fn cycle_prop(&mut self) -> PropName {
        self.prop = self.prop.next();
        self.prop
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Non-finite input is stored as zero.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = if threshold.is_finite() { threshold } else { 0.0 };
    }

    pub fn raise_threshold(&mut self) {
        self.set_threshold(self.threshold + THRESHOLD_STEP);
    }

    pub fn lower_threshold(&mut self) {
        self.set_threshold((self.threshold - THRESHOLD_STEP).max(0.0));
    }

    pub fn add_leg(&mut self) -> Result<PropLeg, SlipError> {
        let player = self.selected.as_ref().ok_or(SlipError::NoPlayerSelected)?;
        let leg = PropLeg::new(player.id, self.prop, self.threshold);
        self.legs.push(leg.clone());
        Ok(leg)
    }

    pub fn legs(&self) -> &[PropLeg] {
        &self.legs
    }

    /// Legs joined as `id:prop≥threshold`, or `none`.
    pub fn summary(&self) -> String {
        if self.legs.is_empty() {
            return "none".to_string();
        }
        self.legs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Drops legs and any pricing outcome. The selected player stays.
    pub fn reset(&mut self) -> Result<(), SlipError> {
        if self.busy {
            return Err(SlipError::Busy);
        }
        self.legs.clear();
        self.pricing = None;
        self.error = None;
        Ok(())
    }

    /// Marks a pricing request as started and hands back the legs to send.
    pub fn begin_pricing(&mut self) -> Result<Vec<PropLeg>, SlipError> {
        if self.busy {
            return Err(SlipError::Busy);
        }
        if self.legs.is_empty() {
            return Err(SlipError::Empty);
        }
        self.busy = true;
        self.pricing = None;
        self.error = None;
        Ok(self.legs.clone())
    }

    pub fn finish_pricing<E: std::fmt::Display>(&mut self, outcome: Result<Pricing, E>) {
        self.busy = false;
        match outcome {
            Ok(pricing) => self.pricing = Some(pricing),
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pricing(&self) -> Option<&Pricing> {
        self.pricing.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropProbability;

    fn tatum() -> Player {
        Player::new(201, "Jayson Tatum", Some("BOS"))
    }

    #[test]
    fn add_leg_requires_selection() {
        let mut slip = ParlaySlip::new();
        assert_eq!(slip.add_leg().unwrap_err(), SlipError::NoPlayerSelected);
        assert_eq!(SlipError::NoPlayerSelected.to_string(), "Pick a player first");
    }

    #[test]
    fn legs_use_current_prop_and_threshold() {
        let mut slip = ParlaySlip::new();
        slip.select(&tatum());
        slip.add_leg().unwrap();
        slip.cycle_prop();
        slip.set_threshold(8.0);
        slip.add_leg().unwrap();

        assert_eq!(slip.summary(), "201:pts≥25 | 201:reb≥8");
    }

    #[test]
    fn threshold_stays_non_negative_and_finite() {
        let mut slip = ParlaySlip::new();
        slip.set_threshold(0.5);
        slip.lower_threshold();
        assert_eq!(slip.threshold(), 0.0);
        slip.set_threshold(f64::NAN);
        assert_eq!(slip.threshold(), 0.0);
        slip.raise_threshold();
        assert_eq!(slip.threshold(), 1.0);
    }

    #[test]
    fn pricing_lifecycle() {
        let mut slip = ParlaySlip::new();
        assert_eq!(slip.begin_pricing().unwrap_err(), SlipError::Empty);

        slip.select(&tatum());
        slip.add_leg().unwrap();
        let legs = slip.begin_pricing().unwrap();
        assert_eq!(legs.len(), 1);
        assert!(slip.is_busy());
        assert_eq!(slip.reset().unwrap_err(), SlipError::Busy);

        slip.finish_pricing::<String>(Ok(Pricing::Single(PropProbability {
            probability: 0.42,
            sample_size: 60,
            details: serde_json::Value::Null,
        })));
        assert!(!slip.is_busy());
        assert_eq!(slip.pricing().map(Pricing::probability), Some(0.42));

        slip.reset().unwrap();
        assert!(slip.legs().is_empty());
        assert!(slip.pricing().is_none());
        assert!(slip.selected().is_some());
    }

    #[test]
    fn failed_pricing_keeps_message() {
        let mut slip = ParlaySlip::new();
        slip.select(&tatum());
        slip.add_leg().unwrap();
        slip.begin_pricing().unwrap();
        slip.finish_pricing::<String>(Err("Player not found".to_string()));
        assert_eq!(slip.error(), Some("Player not found"));
        slip.clear_selection();
        assert!(slip.selected().is_none());
    }
}
