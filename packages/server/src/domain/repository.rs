//! Repository trait definitions.
//!
//! The domain layer defines the data-access interfaces it needs; the
//! Infrastructure layer provides the concrete implementations
//! (dependency inversion, as everywhere else in this codebase).

use async_trait::async_trait;

use super::{GameRecord, Motd, Player, RepositoryError, SubmittedGame};

/// Data store for player records.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Fetch a single player by id.
    async fn get(&self, id: i32) -> Result<Player, RepositoryError>;

    /// Insert or replace a player record.
    async fn upsert(&self, player: Player) -> Result<(), RepositoryError>;

    /// Page through players ordered by best game time, descending.
    /// `page_num` starts at 1.
    async fn get_all(&self, page_size: usize, page_num: usize)
    -> Result<Vec<Player>, RepositoryError>;

    /// Total number of player records.
    async fn total_count(&self) -> Result<usize, RepositoryError>;
}

/// Data store for submitted games.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Insert a submitted game and return its new record id.
    async fn insert(&self, game: SubmittedGame) -> Result<i32, RepositoryError>;

    /// Fetch a single game record by id.
    async fn get(&self, id: i32) -> Result<GameRecord, RepositoryError>;

    /// If an identical run was already recorded, return its id.
    async fn check_duplicate(&self, game: &SubmittedGame) -> Result<Option<i32>, RepositoryError>;

    /// Most recently submitted games, newest first. When `player_id`
    /// is given only that player's games are returned. `page_num`
    /// starts at 1.
    async fn get_recent(
        &self,
        player_id: Option<i32>,
        page_size: usize,
        page_num: usize,
    ) -> Result<Vec<GameRecord>, RepositoryError>;

    /// Best games by game time, descending.
    async fn get_top(&self, limit: usize) -> Result<Vec<GameRecord>, RepositoryError>;

    /// Total number of game records, optionally for one player.
    async fn total_count(&self, player_id: Option<i32>) -> Result<usize, RepositoryError>;
}

/// Store for the message of the day.
#[async_trait]
pub trait MotdRepository: Send + Sync {
    async fn get(&self) -> Result<Motd, RepositoryError>;

    async fn set(&self, motd: Motd) -> Result<(), RepositoryError>;
}
