//! Propdash Configuration Module
//!
//! Loads `propdash.toml` and exposes one section per concern. Every field has
//! a serde default so partial files are accepted.

pub mod constants;
pub mod loader;

pub use loader::{ConfigManager, PropdashConfig};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use constants::{api, search, telemetry};

/// Player search widget settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Input hint shown while the box is empty
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Maximum results requested per lookup
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Style hook passed through to the renderer
    #[serde(default)]
    pub class_name: String,

    /// Storage key for the recent selections list
    #[serde(default = "default_recent_key")]
    pub recent_key: String,

    /// Open the dropdown as soon as the widget starts
    #[serde(default)]
    pub auto_focus: bool,

    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,

    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            limit: default_limit(),
            class_name: String::new(),
            recent_key: default_recent_key(),
            auto_focus: false,
            quiet_period_ms: default_quiet_period_ms(),
            min_query_chars: default_min_query_chars(),
            recent_capacity: default_recent_capacity(),
        }
    }
}

fn default_placeholder() -> String {
    search::DEFAULT_PLACEHOLDER.to_string()
}
fn default_limit() -> usize {
    search::DEFAULT_LIMIT
}
fn default_recent_key() -> String {
    search::DEFAULT_RECENT_KEY.to_string()
}
fn default_quiet_period_ms() -> u64 {
    search::DEFAULT_QUIET_PERIOD_MS
}
fn default_min_query_chars() -> usize {
    search::DEFAULT_MIN_QUERY_CHARS
}
fn default_recent_capacity() -> usize {
    search::DEFAULT_RECENT_CAPACITY
}

/// Statistics service connection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Monte Carlo samples requested when pricing a parlay
    #[serde(default = "default_sgp_samples")]
    pub sgp_samples: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sgp_samples: default_sgp_samples(),
        }
    }
}

impl ApiConfig {
    /// Base URL after applying the environment override.
    pub fn resolved_base_url(&self) -> String {
        std::env::var(api::API_BASE_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }
}

fn default_base_url() -> String {
    api::DEFAULT_API_BASE.to_string()
}
fn default_sgp_samples() -> u32 {
    api::DEFAULT_SGP_SAMPLES
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding persisted state; `~/.propdash` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File name, inside the state directory, for interactive session logs
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    telemetry::DEFAULT_LOG_LEVEL.to_string()
}
fn default_log_file() -> String {
    telemetry::DEFAULT_LOG_FILE.to_string()
}
