use tracing::warn;

use crate::config::constants::search::{DEFAULT_RECENT_CAPACITY, DEFAULT_RECENT_KEY};
use crate::models::Player;
use crate::storage::{KeyValueStore, StorageError};

/// Most-recent-first cache of selected players, persisted under one key.
///
/// Entries are unique by id and never exceed `capacity`. Storage failures
/// never reach the caller: a failed read yields an empty list and a failed
/// write leaves the in-memory list updated for the rest of the session.
pub struct RecentSelectionStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    entries: Vec<Player>,
}

impl RecentSelectionStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self::with_capacity(store, key, DEFAULT_RECENT_CAPACITY)
    }

    pub fn with_capacity(
        store: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Store using the default `recentPlayers` key.
    pub fn with_default_key(store: Box<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_RECENT_KEY)
    }

    /// Read the persisted list into memory and return it.
    pub fn load(&mut self) -> &[Player] {
        self.entries = match self.read() {
            Ok(entries) => entries,
            Err(error) => {
                warn!(key = %self.key, %error, "ignoring unreadable recent selections");
                Vec::new()
            }
        };
        &self.entries
    }

    /// Move `player` to the front, evicting the oldest entry past capacity,
    /// and persist before returning.
    pub fn record(&mut self, player: Player) -> &[Player] {
        self.entries.retain(|entry| entry.id != player.id);
        self.entries.insert(0, player);
        self.entries.truncate(self.capacity);

        if let Err(error) = self.write() {
            warn!(key = %self.key, %error, "recent selections kept for this session only");
        }
        &self.entries
    }

    /// Forget every entry, in memory and on disk.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(error) = self.store.remove(&self.key) {
            warn!(key = %self.key, %error, "failed to clear persisted recent selections");
        }
    }

    pub fn entries(&self) -> &[Player] {
        &self.entries
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Vec<Player>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<Player> = serde_json::from_str(&raw)?;

        // Hand-edited or older data may break the invariants; repair on load.
        let mut seen = std::collections::HashSet::new();
        entries.retain(|entry| seen.insert(entry.id));
        entries.truncate(self.capacity);
        Ok(entries)
    }

    fn write(&mut self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &payload)
    }
}
