//! UseCase: accept a completed-game submission.

use std::sync::Arc;

use crate::domain::{GameRepository, PlayerRepository, StatsProvider, SubmittedGame};

use super::error::SubmitError;

/// Result of a successful submission.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The same run was recorded earlier; nothing was written.
    Duplicate { game_id: i32 },
    /// The game was accepted and stored under `game_id`.
    Inserted { game_id: i32 },
}

/// Validates a submission, refreshes the player record from the stats
/// provider and stores the game.
pub struct SubmitGameUseCase {
    games: Arc<dyn GameRepository>,
    players: Arc<dyn PlayerRepository>,
    provider: Arc<dyn StatsProvider>,
}

impl SubmitGameUseCase {
    pub fn new(
        games: Arc<dyn GameRepository>,
        players: Arc<dyn PlayerRepository>,
        provider: Arc<dyn StatsProvider>,
    ) -> Self {
        Self {
            games,
            players,
            provider,
        }
    }

    /// Accept one submitted game.
    ///
    /// Duplicate submissions short-circuit before any write. The
    /// player refresh from the provider happens on every accepted
    /// submission so leaderboard queries stay current even when the
    /// player never calls the update endpoint.
    pub async fn execute(&self, game: SubmittedGame) -> Result<SubmitOutcome, SubmitError> {
        // Checked in this order: a flagged run, then a missing
        // version, then an unresolved player id.
        if game.player_id == -1 {
            return Err(SubmitError::InvalidPlayerId);
        }
        if game.version.is_empty() {
            return Err(SubmitError::MissingVersion);
        }
        if game.player_id == 0 {
            return Err(SubmitError::MissingPlayerId);
        }

        if let Some(game_id) = self.games.check_duplicate(&game).await? {
            tracing::info!(player_id = game.player_id, game_id, "duplicate game submission");
            return Ok(SubmitOutcome::Duplicate { game_id });
        }

        let player = self.provider.player_by_id(game.player_id).await?;
        self.players.upsert(player).await?;

        let game_id = self.games.insert(game).await?;
        tracing::info!(game_id, "game submitted");
        Ok(SubmitOutcome::Inserted { game_id })
    }
}
