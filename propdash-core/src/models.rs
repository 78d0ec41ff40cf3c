//! Domain types shared by the search widget and the pricing service client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player as returned by the search provider.
///
/// Players are immutable once received; the widget never re-sorts or edits
/// the entries it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_abbrev: Option<String>,
}

impl Player {
    pub fn new(id: i64, full_name: impl Into<String>, team_abbrev: Option<&str>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            team_abbrev: team_abbrev.map(str::to_string),
        }
    }

    /// Secondary line shown under the name in the dropdown.
    pub fn caption(&self) -> String {
        match &self.team_abbrev {
            Some(team) => format!("ID {} • {team}", self.id),
            None => format!("ID {}", self.id),
        }
    }
}

/// Box-score statistic a leg is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropName {
    #[default]
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    Tov,
    Fg3m,
}

impl PropName {
    pub const ALL: [PropName; 7] = [
        PropName::Pts,
        PropName::Reb,
        PropName::Ast,
        PropName::Stl,
        PropName::Blk,
        PropName::Tov,
        PropName::Fg3m,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pts => "pts",
            Self::Reb => "reb",
            Self::Ast => "ast",
            Self::Stl => "stl",
            Self::Blk => "blk",
            Self::Tov => "tov",
            Self::Fg3m => "fg3m",
        }
    }

    /// Parse a prop from its canonical name or a common alias
    /// ("points", "boards", "dimes", "threes", ...).
    pub fn from_alias(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let prop = match normalized.as_str() {
            "pts" | "p" | "point" | "points" => Self::Pts,
            "reb" | "rebounds" | "boards" => Self::Reb,
            "ast" | "assists" | "dimes" => Self::Ast,
            "stl" | "steals" => Self::Stl,
            "blk" | "blocks" => Self::Blk,
            "tov" | "turnovers" => Self::Tov,
            "fg3m" | "threes" | "3pm" | "3pt" => Self::Fg3m,
            _ => return None,
        };
        Some(prop)
    }

    /// The prop after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| {
            let allowed: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
            format!("unknown prop '{s}' (expected one of {})", allowed.join(", "))
        })
    }
}

/// Comparison applied between the stat line and the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PropOp {
    #[default]
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = ">")]
    Above,
    #[serde(rename = "over")]
    Over,
}

/// One proposition-bet constraint priced by the statistics service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropLeg {
    pub player_id: i64,
    pub prop: PropName,
    pub threshold: f64,
    #[serde(default)]
    pub op: PropOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl PropLeg {
    pub fn new(player_id: i64, prop: PropName, threshold: f64) -> Self {
        Self {
            player_id,
            prop,
            threshold,
            op: PropOp::default(),
            date: None,
        }
    }
}

impl fmt::Display for PropLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}≥{}", self.player_id, self.prop, self.threshold)
    }
}

impl FromStr for PropLeg {
    type Err = String;

    /// Parses `player_id:prop:threshold`, e.g. `201:pts:25.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [player, prop, threshold] = parts.as_slice() else {
            return Err(format!(
                "invalid leg '{s}' (expected <player_id>:<prop>:<threshold>)"
            ));
        };
        let player_id = player
            .parse::<i64>()
            .map_err(|_| format!("invalid player id '{player}'"))?;
        let prop = prop.parse::<PropName>()?;
        let threshold = threshold
            .parse::<f64>()
            .map_err(|_| format!("invalid threshold '{threshold}'"))?;
        if !threshold.is_finite() {
            return Err(format!("invalid threshold '{threshold}'"));
        }
        Ok(Self::new(player_id, prop, threshold))
    }
}

/// Single-leg pricing reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropProbability {
    pub probability: f64,
    pub sample_size: u64,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegMarginal {
    pub marginal: f64,
    pub threshold: f64,
}

/// Multi-leg (same game parlay) pricing reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayProbability {
    pub joint_probability: f64,
    pub per_leg: Vec<LegMarginal>,
    /// Square matrix of pairwise rank correlations between legs.
    pub kendall_tau: Vec<Vec<f64>>,
    pub sample_size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pricing {
    Single(PropProbability),
    Parlay(ParlayProbability),
}

impl Pricing {
    /// Headline probability: the single-leg probability or the joint one.
    pub fn probability(&self) -> f64 {
        match self {
            Self::Single(single) => single.probability,
            Self::Parlay(parlay) => parlay.joint_probability,
        }
    }

    pub fn sample_size(&self) -> u64 {
        match self {
            Self::Single(single) => single.sample_size,
            Self::Parlay(parlay) => parlay.sample_size,
        }
    }
}
