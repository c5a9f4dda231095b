//! HTTP client for the upstream stats provider.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{Player, ProviderError, StatsProvider};

/// [`StatsProvider`] backed by the provider's public JSON API.
pub struct HttpStatsProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatsProvider {
    /// `base_url` without a trailing slash, e.g. `https://stats.example.com`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StatsProvider for HttpStatsProvider {
    async fn player_by_id(&self, id: i32) -> Result<Player, ProviderError> {
        let url = format!("{}/api/v2/players/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::PlayerNotFound(id));
        }
        let response = response
            .error_for_status()
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        response
            .json::<Player>()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }
}
