//! Command handlers for the `propdash` binary.

pub mod config;
pub mod pick;
pub mod price;
pub mod recent;
pub mod search;

use anyhow::Result;
use propdash_core::api::{ApiClient, HttpSearchProvider, PricingClient};
use propdash_core::cli::args::Cli;
use propdash_core::config::{ConfigManager, PropdashConfig};
use propdash_core::search::{RecentSelectionStore, SearchOptions};
use propdash_core::storage::{FileStore, resolve_state_dir};
use std::path::{Path, PathBuf};

/// Resolved settings shared by every subcommand.
pub struct CommandContext {
    manager: ConfigManager,
    workspace: PathBuf,
    state_dir: PathBuf,
    api_base: String,
}

impl CommandContext {
    pub fn new(args: &Cli, manager: ConfigManager, workspace: PathBuf) -> Result<Self> {
        let config = manager.config();
        let configured_dir = args
            .state_dir
            .as_deref()
            .or(config.storage.state_dir.as_deref());
        let state_dir = resolve_state_dir(configured_dir)?;
        let api_base = args
            .api_base
            .clone()
            .unwrap_or_else(|| config.api.resolved_base_url());

        Ok(Self {
            manager,
            workspace,
            state_dir,
            api_base,
        })
    }

    pub fn config(&self) -> &PropdashConfig {
        self.manager.config()
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.manager.config_path()
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.api_base.clone())
    }

    pub fn search_provider(&self) -> HttpSearchProvider {
        HttpSearchProvider::new(self.api_client())
    }

    pub fn pricing_client(&self, samples: Option<u32>) -> PricingClient {
        let samples = samples.unwrap_or(self.config().api.sgp_samples);
        PricingClient::with_samples(self.api_client(), samples)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::from(&self.config().search)
    }

    pub fn store(&self) -> FileStore {
        FileStore::in_dir(&self.state_dir)
    }

    pub fn recent_store(&self) -> RecentSelectionStore {
        let search = &self.config().search;
        RecentSelectionStore::with_capacity(
            Box::new(self.store()),
            search.recent_key.clone(),
            search.recent_capacity,
        )
    }
}
