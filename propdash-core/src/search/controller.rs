use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::debounce::{Debounce, QueryDebouncer};
use super::guard::AsyncResultGuard;
use super::navigation::{NavKey, NavOutcome, NavigationStateMachine, displayed_list};
use super::recent::RecentSelectionStore;
use super::SearchEvent;
use crate::api::{SearchProvider, SearchRequest};
use crate::config::SearchConfig;
use crate::config::constants::search as defaults;
use crate::models::Player;
use crate::storage::KeyValueStore;

const FALLBACK_ERROR_MESSAGE: &str = "Search failed";

/// Called with the committed player after every selection.
pub type SelectionCallback = Box<dyn FnMut(&Player) + Send>;

/// Host-facing options for one widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub placeholder: String,
    pub limit: usize,
    /// Opaque style hook handed back to the renderer.
    pub class_name: String,
    pub recent_key: String,
    pub auto_focus: bool,
    pub quiet_period: Duration,
    pub min_query_chars: usize,
    pub recent_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            placeholder: defaults::DEFAULT_PLACEHOLDER.to_string(),
            limit: defaults::DEFAULT_LIMIT,
            class_name: String::new(),
            recent_key: defaults::DEFAULT_RECENT_KEY.to_string(),
            auto_focus: false,
            quiet_period: Duration::from_millis(defaults::DEFAULT_QUIET_PERIOD_MS),
            min_query_chars: defaults::DEFAULT_MIN_QUERY_CHARS,
            recent_capacity: defaults::DEFAULT_RECENT_CAPACITY,
        }
    }
}

/// Config can only tighten the query length floor and shrink the recent list.
impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            placeholder: config.placeholder.clone(),
            limit: config.limit,
            class_name: config.class_name.clone(),
            recent_key: config.recent_key.clone(),
            auto_focus: config.auto_focus,
            quiet_period: Duration::from_millis(config.quiet_period_ms),
            min_query_chars: config.min_query_chars.max(defaults::DEFAULT_MIN_QUERY_CHARS),
            recent_capacity: config
                .recent_capacity
                .clamp(1, defaults::DEFAULT_RECENT_CAPACITY),
        }
    }
}

/// What the dropdown body should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewStatus<'a> {
    Loading,
    Error(&'a str),
    NoResults,
    Rows(&'a [Player]),
}

/// Read-only snapshot for renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchView<'a> {
    pub text: &'a str,
    pub placeholder: &'a str,
    pub class_name: &'a str,
    pub open: bool,
    pub highlight: Option<usize>,
    pub status: ViewStatus<'a>,
    /// The rows come from the recent list rather than live results.
    pub showing_recent: bool,
}

/// The player search widget's state machine.
///
/// Owns the debouncer, the staleness guard, the recent list, and the
/// dropdown state. Side effects are limited to one lookup per settled query
/// and reads/writes of the recent list.
pub struct SearchController {
    options: SearchOptions,
    provider: Arc<dyn SearchProvider>,
    debouncer: QueryDebouncer,
    guard: AsyncResultGuard,
    recent: RecentSelectionStore,
    nav: NavigationStateMachine,
    text: String,
    results: Vec<Player>,
    loading: bool,
    error: Option<String>,
    sender: UnboundedSender<SearchEvent>,
    events: UnboundedReceiver<SearchEvent>,
    on_select: Option<SelectionCallback>,
}

impl SearchController {
    /// Build a controller and synchronously load the recent list from `store`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        options: SearchOptions,
        provider: Arc<dyn SearchProvider>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        let debouncer = QueryDebouncer::with_settings(
            sender.clone(),
            options.quiet_period,
            options.min_query_chars,
        );
        let mut recent = RecentSelectionStore::with_capacity(
            store,
            options.recent_key.clone(),
            options.recent_capacity,
        );
        recent.load();

        let mut nav = NavigationStateMachine::new();
        if options.auto_focus {
            nav.open();
        }

        Self {
            options,
            provider,
            debouncer,
            guard: AsyncResultGuard::new(),
            recent,
            nav,
            text: String::new(),
            results: Vec::new(),
            loading: false,
            error: None,
            sender,
            events,
            on_select: None,
        }
    }

    pub fn with_on_select(mut self, callback: impl FnMut(&Player) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn set_on_select(&mut self, callback: SelectionCallback) {
        self.on_select = Some(callback);
    }

    pub fn on_input_change(&mut self, text: &str) {
        self.text = text.to_string();
        self.nav.open();

        match self.debouncer.schedule(text) {
            Debounce::Cleared => {
                self.results.clear();
                self.error = None;
                self.loading = false;
                self.guard.invalidate();
            }
            Debounce::Pending(_) => {
                self.loading = true;
                self.error = None;
            }
        }
        self.reconcile_highlight();
    }

    pub fn on_focus(&mut self) {
        self.nav.open();
    }

    /// Pointer or focus activity outside the widget's bounds.
    pub fn on_outside_interaction(&mut self) {
        self.nav.close();
    }

    pub fn on_key(&mut self, key: NavKey) -> NavOutcome {
        let outcome = self.nav.handle_key(key, self.displayed().len());
        if let NavOutcome::Commit(index) = outcome {
            if let Some(player) = self.displayed().get(index).cloned() {
                self.commit(player);
            }
        }
        outcome
    }

    pub fn on_hover(&mut self, index: usize) {
        let len = self.displayed().len();
        self.nav.hover(index, len);
    }

    /// Pointer click on row `index` of the displayed list.
    pub fn on_row_click(&mut self, index: usize) {
        if let Some(player) = self.displayed().get(index).cloned() {
            self.on_select(player);
        }
    }

    pub fn on_select(&mut self, player: Player) {
        self.commit(player);
    }

    /// Wait for the next background completion.
    pub async fn next_event(&mut self) -> Option<SearchEvent> {
        self.events.recv().await
    }

    pub fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::QuerySettled { ticket } => {
                if let Some(query) = self.debouncer.take_settled(ticket) {
                    self.dispatch(query);
                }
            }
            SearchEvent::LookupFinished { tag, outcome } => {
                if !self.guard.admits(&tag) {
                    return;
                }
                self.loading = false;
                match outcome {
                    Ok(players) => {
                        debug!(query = tag.query(), count = players.len(), "adopted lookup results");
                        self.results = players;
                        self.error = None;
                    }
                    Err(error) => {
                        debug!(query = tag.query(), %error, "player lookup failed");
                        let message = error.to_string();
                        self.error = Some(if message.trim().is_empty() {
                            FALLBACK_ERROR_MESSAGE.to_string()
                        } else {
                            message
                        });
                    }
                }
                self.reconcile_highlight();
            }
        }
    }

    pub fn view(&self) -> SearchView<'_> {
        let displayed = self.displayed();
        let status = if self.loading {
            ViewStatus::Loading
        } else if let Some(error) = &self.error {
            ViewStatus::Error(error.as_str())
        } else if displayed.is_empty() {
            ViewStatus::NoResults
        } else {
            ViewStatus::Rows(displayed)
        };

        SearchView {
            text: &self.text,
            placeholder: &self.options.placeholder,
            class_name: &self.options.class_name,
            open: self.nav.is_open(),
            highlight: self.nav.highlight(),
            status,
            showing_recent: self.results.is_empty() && !displayed.is_empty(),
        }
    }

    pub fn displayed(&self) -> &[Player] {
        displayed_list(&self.results, self.recent.entries())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> &[Player] {
        &self.results
    }

    pub fn recent(&self) -> &[Player] {
        self.recent.entries()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.nav.highlight()
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
        self.reconcile_highlight();
    }

    fn dispatch(&mut self, query: String) {
        let tag = self.guard.dispatch(&query);
        let request = SearchRequest::new(query, self.options.limit);
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        self.loading = true;

        debug!(query = %request.query, limit = request.limit, "dispatching player lookup");
        tokio::spawn(async move {
            let outcome = provider.search(&request).await;
            let _ = sender.send(SearchEvent::LookupFinished { tag, outcome });
        });
    }

    fn commit(&mut self, player: Player) {
        if self.debouncer.is_pending() {
            self.debouncer.cancel();
            self.loading = false;
        }
        self.recent.record(player.clone());
        self.text = player.full_name.clone();
        self.nav.close();
        if let Some(callback) = self.on_select.as_mut() {
            callback(&player);
        }
    }

    fn reconcile_highlight(&mut self) {
        let len = self.displayed().len();
        self.nav.reconcile(len);
    }
}
