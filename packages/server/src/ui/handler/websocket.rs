//! WebSocket upgrade handler for live-session spectating.

use std::sync::Arc;

use axum::{
    extract::{Query, State, ws::WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::hub::handle_connection;

use super::super::state::AppState;

/// Query parameters for the WebSocket endpoint.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub room: Option<String>,
}

/// `GET /ws?room=NAME` — upgrade and hand the socket to the hub.
///
/// A missing `room` parameter is rejected with 404 before the upgrade
/// takes place; no hub state is created for it.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<WsQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(room) = query.room else {
        tracing::warn!("websocket upgrade rejected: no room parameter");
        return Err(StatusCode::NOT_FOUND);
    };

    let hub = state.hub.clone();
    Ok(ws.on_upgrade(move |socket| handle_connection(socket, hub, room)))
}
