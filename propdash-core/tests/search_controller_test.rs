use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use propdash_core::api::{ApiError, SearchProvider, SearchRequest};
use propdash_core::models::Player;
use propdash_core::search::{
    NavKey, NavOutcome, RecentSelectionStore, SearchController, SearchOptions, ViewStatus,
};
use propdash_core::storage::{FileStore, MemoryStore};
use tempfile::tempdir;

enum Reply {
    Players(Vec<Player>),
    Fail(&'static str),
}

/// Replies per query after a per-query delay; records every request.
#[derive(Default)]
struct ScriptedProvider {
    script: HashMap<String, (Duration, Reply)>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedProvider {
    fn reply(mut self, query: &str, delay_ms: u64, reply: Reply) -> Self {
        self.script
            .insert(query.to_string(), (Duration::from_millis(delay_ms), reply));
        self
    }

    fn queries(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.query.clone())
            .collect()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Player>, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let Some((delay, reply)) = self.script.get(&request.query) else {
            return Ok(Vec::new());
        };
        tokio::time::sleep(*delay).await;
        match reply {
            Reply::Players(players) => Ok(players.clone()),
            Reply::Fail(detail) => Err(ApiError::Status {
                status: 500,
                detail: detail.to_string(),
            }),
        }
    }
}

fn tatum() -> Player {
    Player::new(201, "Jayson Tatum", Some("BOS"))
}

fn tatum_roster() -> Vec<Player> {
    vec![tatum(), Player::new(1629, "Tatum Jr.", None)]
}

fn tat_roster() -> Vec<Player> {
    vec![Player::new(5, "Tat Old", Some("LAL"))]
}

fn controller(provider: Arc<ScriptedProvider>) -> SearchController {
    SearchController::new(
        SearchOptions::default(),
        provider,
        Box::new(MemoryStore::new()),
    )
}

async fn drain(search: &mut SearchController) {
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_secs(2), search.next_event()).await
    {
        search.handle_event(event);
    }
}

async fn type_text(search: &mut SearchController, text: &str, gap_ms: u64) {
    let mut typed = String::new();
    for ch in text.chars() {
        typed.push(ch);
        search.on_input_change(&typed);
        tokio::time::sleep(Duration::from_millis(gap_ms)).await;
    }
}

#[tokio::test(start_paused = true)]
async fn short_query_sends_nothing() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut search = controller(provider.clone());

    search.on_input_change(" t ");
    drain(&mut search).await;

    assert!(provider.queries().is_empty());
    assert!(search.results().is_empty());
    assert!(!search.is_loading());
    assert!(search.is_open());
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_makes_one_request() {
    let provider =
        Arc::new(ScriptedProvider::default().reply("tatum", 20, Reply::Players(tatum_roster())));
    let mut search = controller(provider.clone());

    type_text(&mut search, "tatum", 50).await;
    drain(&mut search).await;

    assert_eq!(provider.queries(), vec!["tatum".to_string()]);
    assert_eq!(search.results(), tatum_roster().as_slice());
    assert!(!search.is_loading());
}

#[tokio::test(start_paused = true)]
async fn slower_stale_reply_is_discarded() {
    let provider = Arc::new(
        ScriptedProvider::default()
            .reply("tat", 500, Reply::Players(tat_roster()))
            .reply("tatum", 50, Reply::Players(tatum_roster())),
    );
    let mut search = controller(provider.clone());

    search.on_input_change("tat");
    let settled = search.next_event().await.unwrap();
    search.handle_event(settled);
    // Let the spawned lookup issue its request.
    tokio::task::yield_now().await;
    assert_eq!(provider.queries(), vec!["tat".to_string()]);

    search.on_input_change("tatum");
    drain(&mut search).await;

    assert_eq!(
        provider.queries(),
        vec!["tat".to_string(), "tatum".to_string()]
    );
    assert_eq!(search.results(), tatum_roster().as_slice());
    assert!(!search.is_loading());
}

#[tokio::test(start_paused = true)]
async fn short_query_hides_late_reply() {
    let provider =
        Arc::new(ScriptedProvider::default().reply("tat", 500, Reply::Players(tat_roster())));
    let mut search = controller(provider);

    search.on_input_change("tat");
    let settled = search.next_event().await.unwrap();
    search.handle_event(settled);

    search.on_input_change("t");
    drain(&mut search).await;

    assert!(search.results().is_empty());
    assert!(!search.is_loading());
}

#[tokio::test(start_paused = true)]
async fn enter_commits_and_persists_recent() {
    let dir = tempdir().unwrap();
    let provider =
        Arc::new(ScriptedProvider::default().reply("tatum", 10, Reply::Players(tatum_roster())));
    let picked = Arc::new(Mutex::new(Vec::new()));
    let sink = picked.clone();

    let mut search = SearchController::new(
        SearchOptions::default(),
        provider.clone(),
        Box::new(FileStore::in_dir(dir.path())),
    )
    .with_on_select(move |player| sink.lock().unwrap().push(player.id));

    search.on_input_change("tatum");
    drain(&mut search).await;

    assert_eq!(search.on_key(NavKey::ArrowDown), NavOutcome::Moved(0));
    assert_eq!(search.on_key(NavKey::Enter), NavOutcome::Commit(0));

    assert_eq!(*picked.lock().unwrap(), vec![201]);
    assert_eq!(search.text(), "Jayson Tatum");
    assert!(!search.is_open());
    assert_eq!(search.recent()[0], tatum());

    // Committing does not look up the display name.
    drain(&mut search).await;
    assert_eq!(provider.queries(), vec!["tatum".to_string()]);

    let mut reloaded = RecentSelectionStore::new(
        Box::new(FileStore::in_dir(dir.path())),
        "recentPlayers",
    );
    assert_eq!(reloaded.load().first().map(|p| p.id), Some(201));
}

#[tokio::test(start_paused = true)]
async fn clearing_input_shows_recent_list() {
    let provider =
        Arc::new(ScriptedProvider::default().reply("tatum", 10, Reply::Players(tatum_roster())));
    let mut search = controller(provider);

    search.on_input_change("tatum");
    drain(&mut search).await;
    search.on_select(tatum());

    search.on_input_change("");
    let view = search.view();
    assert!(view.open);
    assert!(view.showing_recent);
    assert_eq!(view.status, ViewStatus::Rows(&[tatum()][..]));
    assert!(search.results().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_lookup_sets_inline_error() {
    let provider = Arc::new(
        ScriptedProvider::default()
            .reply("tatum", 10, Reply::Players(tatum_roster()))
            .reply("tatumx", 10, Reply::Fail("Network Error")),
    );
    let mut search = controller(provider);

    search.on_input_change("tatum");
    drain(&mut search).await;
    search.on_input_change("tatumx");
    drain(&mut search).await;

    assert_eq!(search.error(), Some("Network Error"));
    assert!(!search.is_loading());
    assert_eq!(search.view().status, ViewStatus::Error("Network Error"));
    assert_eq!(search.results(), tatum_roster().as_slice());

    search.on_input_change("tatum");
    assert_eq!(search.error(), None);
    drain(&mut search).await;
    assert_eq!(search.results(), tatum_roster().as_slice());
}

#[tokio::test(start_paused = true)]
async fn escape_then_arrow_reopens() {
    let provider =
        Arc::new(ScriptedProvider::default().reply("tatum", 10, Reply::Players(tatum_roster())));
    let mut search = controller(provider);

    search.on_input_change("tatum");
    drain(&mut search).await;

    assert_eq!(search.on_key(NavKey::Escape), NavOutcome::Closed);
    assert!(!search.is_open());
    assert_eq!(search.text(), "tatum");

    assert_eq!(search.on_key(NavKey::ArrowUp), NavOutcome::Opened);
    assert_eq!(search.on_key(NavKey::ArrowUp), NavOutcome::Moved(0));
    assert_eq!(search.on_key(NavKey::ArrowUp), NavOutcome::Moved(1));
    assert_eq!(search.on_key(NavKey::ArrowDown), NavOutcome::Moved(0));
}
