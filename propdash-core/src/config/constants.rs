/// Search widget defaults
pub mod search {
    pub const DEFAULT_PLACEHOLDER: &str = "Search player…";
    pub const DEFAULT_LIMIT: usize = 8;
    pub const DEFAULT_RECENT_KEY: &str = "recentPlayers";
    pub const DEFAULT_QUIET_PERIOD_MS: u64 = 250;
    pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;
    pub const DEFAULT_RECENT_CAPACITY: usize = 10;
}

/// Statistics service endpoints
pub mod api {
    pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
    pub const API_BASE_ENV: &str = "PROPDASH_API_BASE";
    pub const PLAYER_SEARCH_PATH: &str = "/players/search";
    pub const PROBABILITY_PATH: &str = "/props/probability";
    pub const SGP_PATH: &str = "/props/sgp";
    pub const DEFAULT_SGP_SAMPLES: u32 = 20_000;
}

/// Parlay slip defaults
pub mod slip {
    pub const DEFAULT_THRESHOLD: f64 = 25.0;
    pub const THRESHOLD_STEP: f64 = 1.0;
}

/// Configuration file locations
pub mod files {
    pub const CONFIG_FILE_NAME: &str = "propdash.toml";
    pub const CONFIG_DIR_NAME: &str = ".propdash";
}

pub mod telemetry {
    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const DEFAULT_LOG_FILE: &str = "propdash.log";
}
