//! Server state shared across request handlers.

use std::sync::Arc;

use crate::domain::{GameRepository, MotdRepository, PlayerRepository, StatsProvider};
use crate::hub::Hub;
use crate::usecase::{ClientConnectUseCase, SubmitGameUseCase};

/// Shared application state, constructed once at startup and injected
/// into the router.
pub struct AppState {
    /// Handle to the live-session broadcast hub
    pub hub: Hub,
    /// Player records (data access abstraction)
    pub players: Arc<dyn PlayerRepository>,
    /// Submitted games (data access abstraction)
    pub games: Arc<dyn GameRepository>,
    /// Message of the day
    pub motd: Arc<dyn MotdRepository>,
    /// Upstream stats provider client
    pub provider: Arc<dyn StatsProvider>,
    /// Game submission orchestration
    pub submit_game_usecase: Arc<SubmitGameUseCase>,
    /// Client-connect handshake orchestration
    pub client_connect_usecase: Arc<ClientConnectUseCase>,
}
