use std::path::Path;

use propdash_core::config::constants::api::API_BASE_ENV;
use propdash_core::config::{ConfigManager, PropdashConfig};
use propdash_core::search::SearchOptions;
use std::time::Duration;
use tempfile::TempDir;

struct EnvGuard {
    key: &'static str,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            std::env::remove_var(self.key);
        }
    }
}

fn write_config(dir: &Path, body: &str) {
    std::fs::write(dir.join("propdash.toml"), body).unwrap();
}

#[test]
fn bootstrapped_file_parses_back_to_defaults() {
    let workspace = TempDir::new().unwrap();
    let created = PropdashConfig::bootstrap_project(workspace.path(), false).unwrap();
    assert_eq!(created, vec!["propdash.toml".to_string()]);

    let raw = std::fs::read_to_string(workspace.path().join("propdash.toml")).unwrap();
    let value: toml::Value = toml::from_str(&raw).unwrap();
    assert_eq!(value["search"]["recent_key"].as_str(), Some("recentPlayers"));
    assert_eq!(value["search"]["quiet_period_ms"].as_integer(), Some(250));
    assert_eq!(value["api"]["sgp_samples"].as_integer(), Some(20_000));

    let manager = ConfigManager::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(manager.config(), &PropdashConfig::default());
}

#[test]
fn search_section_drives_widget_options() {
    let workspace = TempDir::new().unwrap();
    write_config(
        workspace.path(),
        r#"
[search]
placeholder = "Find a player"
limit = 5
quiet_period_ms = 400
min_query_chars = 3
recent_capacity = 4
auto_focus = true
"#,
    );

    let manager = ConfigManager::load_from_workspace(workspace.path()).unwrap();
    let options = SearchOptions::from(&manager.config().search);
    assert_eq!(options.placeholder, "Find a player");
    assert_eq!(options.limit, 5);
    assert_eq!(options.quiet_period, Duration::from_millis(400));
    assert_eq!(options.min_query_chars, 3);
    assert_eq!(options.recent_capacity, 4);
    assert!(options.auto_focus);
    assert_eq!(options.recent_key, "recentPlayers");
}

#[test]
fn api_base_environment_override() {
    let workspace = TempDir::new().unwrap();
    write_config(workspace.path(), "[api]\nbase_url = \"http://stats.local:9000\"\n");
    let manager = ConfigManager::load_from_workspace(workspace.path()).unwrap();
    let api = &manager.config().api;

    {
        let _guard = EnvGuard::set(API_BASE_ENV, "http://override:8000");
        assert_eq!(api.resolved_base_url(), "http://override:8000");
    }
    assert_eq!(api.resolved_base_url(), "http://stats.local:9000");
}
