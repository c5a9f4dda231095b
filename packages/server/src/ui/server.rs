//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        http::{
            client_connect, get_game, get_live_players, get_motd, get_player, get_players,
            get_recent_games, get_top_games, health_check, player_update, submit_game,
        },
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Game-statistics server.
///
/// Owns the shared application state and runs the axum router until a
/// shutdown signal arrives.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/v2/players/live", get(get_live_players))
            .route("/api/v2/game/submit", post(submit_game))
            .route("/api/v2/game", get(get_game))
            .route("/api/v2/game/recent", get(get_recent_games))
            .route("/api/v2/game/top", get(get_top_games))
            .route("/api/v2/players", get(get_players))
            .route("/api/v2/player", get(get_player))
            .route("/api/v2/player/update", post(player_update))
            .route("/api/v2/motd", get(get_motd))
            .route("/api/v2/client/connect", post(client_connect))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "game-statistics server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("live sessions: ws://{}/ws?room=ROOM", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
