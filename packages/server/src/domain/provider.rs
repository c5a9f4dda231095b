//! Third-party stats provider interface.

use async_trait::async_trait;

use super::{Player, ProviderError};

/// Client for the upstream stats provider that owns the canonical
/// player records. Submitting a game refreshes the local player record
/// from here so leaderboard queries stay up to date.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch the canonical record for one player.
    async fn player_by_id(&self, id: i32) -> Result<Player, ProviderError>;
}
