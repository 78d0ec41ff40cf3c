use crate::config::constants::files::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::config::{ApiConfig, SearchConfig, StorageConfig, TelemetryConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for Propdash
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PropdashConfig {
    /// Player search widget
    #[serde(default)]
    pub search: SearchConfig,

    /// Statistics service
    #[serde(default)]
    pub api: ApiConfig,

    /// Persisted state location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl PropdashConfig {
    /// Write a default `propdash.toml` into the workspace.
    ///
    /// Returns the names of files written; an existing file is left alone
    /// unless `force` is set.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Vec<String>> {
        let config_path = workspace.as_ref().join(CONFIG_FILE_NAME);
        let mut created_files = Vec::new();

        if !config_path.exists() || force {
            Self::create_sample_config(&config_path)?;
            created_files.push(CONFIG_FILE_NAME.to_string());
        }

        Ok(created_files)
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = toml::to_string_pretty(&PropdashConfig::default())
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Configuration manager for loading configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PropdashConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load from an explicit path when given, otherwise search the workspace.
    pub fn load_with_override(
        explicit: Option<&Path>,
        workspace: impl AsRef<Path>,
    ) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load_from_workspace(workspace),
        }
    }

    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Candidate files in lookup order.
    pub fn candidate_paths(workspace: &Path) -> Vec<PathBuf> {
        let mut candidates = vec![
            workspace.join(CONFIG_FILE_NAME),
            workspace.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        ];
        if let Some(home_dir) = Self::get_home_dir() {
            candidates.push(home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        }
        candidates
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        for candidate in Self::candidate_paths(workspace) {
            if candidate.exists() {
                return Self::load_from_file(&candidate);
            }
        }

        Ok(Self {
            config: PropdashConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PropdashConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PropdashConfig {
        &self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
