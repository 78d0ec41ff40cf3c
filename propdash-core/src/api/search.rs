use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{ApiClient, ApiError};
use crate::config::constants::api::PLAYER_SEARCH_PATH;
use crate::models::Player;

/// One player lookup. Serializes to the `q`/`limit` query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "q")]
    pub query: String,
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
        }
    }
}

/// Source of player matches for the search widget.
///
/// Implementations may complete in any order and may fail; the controller
/// decides which replies to keep.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Player>, ApiError>;
}

/// Provider backed by `GET /players/search`.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: ApiClient,
}

impl HttpSearchProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Player>, ApiError> {
        debug!(query = %request.query, limit = request.limit, "GET {PLAYER_SEARCH_PATH}");
        let mut players: Vec<Player> = self.client.get_json(PLAYER_SEARCH_PATH, request).await?;
        players.truncate(request.limit);
        Ok(players)
    }
}
