//! # propdash-core - Player search and prop pricing runtime
//!
//! `propdash-core` powers the `propdash` terminal client for a basketball
//! player-prop statistics service. Its centrepiece is a headless incremental
//! search widget that a host can drive from any event source.
//!
//! ## Highlights
//!
//! - **Incremental search**: keystrokes are debounced, lookups are tagged so
//!   out-of-order replies never overwrite newer results, and a bounded recent
//!   list is persisted between sessions.
//! - **Keyboard and pointer navigation**: a small state machine owns the
//!   dropdown's open flag and highlighted row.
//! - **Pricing**: legs built from selected players are priced through the
//!   service's single-leg and same-game-parlay endpoints.
//! - **Configuration-First**: everything is driven by `propdash.toml`, with
//!   defaults centralized in `config::constants`.
//!
//! ## Architecture Overview
//!
//! - `search/`: debouncer, result guard, recent store, navigation, controller.
//! - `api/`: HTTP search provider and pricing client.
//! - `storage/`: key-value persistence backing the recent list.
//! - `config/`: configuration loader and defaults.
//! - `ui/tui`: ratatui host for the widget and the parlay slip.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use propdash_core::{ApiClient, HttpSearchProvider, MemoryStore, SearchController, SearchOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let provider = HttpSearchProvider::new(ApiClient::new("http://localhost:8000"));
//!     let mut search = SearchController::new(
//!         SearchOptions::default(),
//!         Arc::new(provider),
//!         Box::new(MemoryStore::new()),
//!     )
//!     .with_on_select(|player| println!("picked {}", player.full_name));
//!
//!     search.on_input_change("tatum");
//!     while let Some(event) = search.next_event().await {
//!         search.handle_event(event);
//!         if !search.is_loading() {
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod parlay;
pub mod search;
pub mod storage;
pub mod ui;

pub use api::{ApiClient, ApiError, HttpSearchProvider, PricingClient, SearchProvider, SearchRequest};
pub use cli::args::{Cli, Commands};
pub use config::{ConfigManager, PropdashConfig};
pub use models::{Player, Pricing, PropLeg, PropName};
pub use parlay::{ParlaySlip, SlipError};
pub use search::{
    AsyncResultGuard, NavKey, NavOutcome, NavigationStateMachine, QueryDebouncer,
    RecentSelectionStore, SearchController, SearchEvent, SearchOptions, SearchView, ViewStatus,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
