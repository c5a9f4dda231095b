//! HTTP API handlers.
//!
//! All error bodies are `{"message": "..."}`; validation messages
//! follow the wording the game client already expects.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::{GameRecord, Motd, Player, RepositoryError, SubmittedGame};
use crate::infrastructure::dto::http::{
    ClientConnectResponse, GamesPage, LivePlayersResponse, MessageResponse, PlayersPage,
    SubmitGameResponse, TopGamesResponse,
};
use crate::usecase::{SubmitError, SubmitOutcome};

use super::super::state::AppState;

type ApiError = (StatusCode, Json<MessageResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn client_message(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
}

fn server_error(err: impl std::fmt::Display) -> ApiError {
    tracing::error!("internal server error: {err}");
    client_message(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// `GET /api/health`
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /api/v2/players/live` — snapshot of the live-state cache.
pub async fn get_live_players(State(state): State<Arc<AppState>>) -> ApiResult<LivePlayersResponse> {
    let players = state.hub.live_players().await.map_err(server_error)?;
    Ok(Json(LivePlayersResponse {
        player_count: players.len(),
        players,
    }))
}

/// `POST /api/v2/game/submit`
pub async fn submit_game(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SubmittedGame>, JsonRejection>,
) -> ApiResult<SubmitGameResponse> {
    let Json(game) = body
        .map_err(|_| client_message(StatusCode::BAD_REQUEST, "malformed data"))?;

    match state.submit_game_usecase.execute(game).await {
        Ok(SubmitOutcome::Duplicate { game_id }) => Ok(Json(SubmitGameResponse {
            message: "Replay already recorded.".to_string(),
            game_id,
        })),
        Ok(SubmitOutcome::Inserted { game_id }) => Ok(Json(SubmitGameResponse {
            message: "Game submitted.".to_string(),
            game_id,
        })),
        Err(
            e @ (SubmitError::InvalidPlayerId
            | SubmitError::MissingPlayerId
            | SubmitError::MissingVersion),
        ) => Err(client_message(StatusCode::BAD_REQUEST, e.to_string())),
        Err(SubmitError::Repository(_)) => Err(client_message(
            StatusCode::BAD_REQUEST,
            "error while inserting data to database",
        )),
        Err(SubmitError::Provider(e)) => Err(server_error(e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i32>,
}

fn require_id(query: &IdQuery) -> Result<i32, ApiError> {
    match query.id {
        Some(id) if id >= 1 => Ok(id),
        _ => Err(client_message(
            StatusCode::BAD_REQUEST,
            "id must be an integer greater than 0",
        )),
    }
}

/// `GET /api/v2/game?id=`
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> ApiResult<GameRecord> {
    let id = require_id(&query)?;
    match state.games.get(id).await {
        Ok(record) => Ok(Json(record)),
        Err(RepositoryError::NoRecord) => Err(client_message(
            StatusCode::NOT_FOUND,
            "no matching record found",
        )),
        Err(e) => Err(server_error(e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentGamesQuery {
    pub player_id: Option<i32>,
    pub page_size: Option<i32>,
    pub page_num: Option<i32>,
}

#[derive(Debug)]
struct Page {
    page_size: usize,
    page_num: usize,
}

fn validate_page(
    page_size: Option<i32>,
    page_num: Option<i32>,
    max_page_size: Option<i32>,
) -> Result<Page, ApiError> {
    let Some(page_size) = page_size else {
        return Err(client_message(
            StatusCode::BAD_REQUEST,
            "page_size must be an integer",
        ));
    };
    match max_page_size {
        Some(max) if page_size < 1 || page_size > max => {
            return Err(client_message(
                StatusCode::BAD_REQUEST,
                format!("page_size must be between 1 and {max}"),
            ));
        }
        None if page_size < 1 => {
            return Err(client_message(
                StatusCode::BAD_REQUEST,
                "page_size must be greater than 0",
            ));
        }
        _ => {}
    }

    let Some(page_num) = page_num else {
        return Err(client_message(
            StatusCode::BAD_REQUEST,
            "page_num must be an integer",
        ));
    };
    if page_num < 1 {
        return Err(client_message(
            StatusCode::BAD_REQUEST,
            "page_num must be greater than 0",
        ));
    }

    Ok(Page {
        page_size: page_size as usize,
        page_num: page_num as usize,
    })
}

fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size)
}

/// `GET /api/v2/game/recent?player_id&page_size&page_num`
pub async fn get_recent_games(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentGamesQuery>,
) -> ApiResult<GamesPage> {
    if let Some(player_id) = query.player_id {
        if player_id < 1 {
            return Err(client_message(
                StatusCode::BAD_REQUEST,
                "player_id must be greater than 0",
            ));
        }
    }
    let page = validate_page(query.page_size, query.page_num, None)?;

    let games = state
        .games
        .get_recent(query.player_id, page.page_size, page.page_num)
        .await
        .map_err(server_error)?;
    if games.is_empty() {
        return Err(client_message(
            StatusCode::NOT_FOUND,
            "no records found in this range",
        ));
    }

    let total_game_count = state
        .games
        .total_count(query.player_id)
        .await
        .map_err(server_error)?;

    Ok(Json(GamesPage {
        total_pages: total_pages(total_game_count, page.page_size),
        total_game_count,
        page_number: page.page_num,
        page_size: page.page_size,
        game_count: games.len(),
        games,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TopGamesQuery {
    pub limit: Option<i32>,
}

/// `GET /api/v2/game/top?limit=`
pub async fn get_top_games(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopGamesQuery>,
) -> ApiResult<TopGamesResponse> {
    let Some(limit) = query.limit else {
        return Err(client_message(
            StatusCode::BAD_REQUEST,
            "limit must be an integer",
        ));
    };
    if !(1..=100).contains(&limit) {
        return Err(client_message(
            StatusCode::BAD_REQUEST,
            "limit must be between 1 and 100",
        ));
    }

    let games = state
        .games
        .get_top(limit as usize)
        .await
        .map_err(server_error)?;
    if games.is_empty() {
        return Err(client_message(
            StatusCode::NOT_FOUND,
            "no records found in this range",
        ));
    }

    Ok(Json(TopGamesResponse {
        game_count: games.len(),
        games,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    pub page_size: Option<i32>,
    pub page_num: Option<i32>,
}

/// `GET /api/v2/players?page_size&page_num`
pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayersQuery>,
) -> ApiResult<PlayersPage> {
    let page = validate_page(query.page_size, query.page_num, Some(100))?;

    let players = state
        .players
        .get_all(page.page_size, page.page_num)
        .await
        .map_err(server_error)?;
    if players.is_empty() {
        return Err(client_message(
            StatusCode::NOT_FOUND,
            "no records found in this range",
        ));
    }

    let total_player_count = state.players.total_count().await.map_err(server_error)?;

    Ok(Json(PlayersPage {
        total_pages: total_pages(total_player_count, page.page_size),
        total_player_count,
        page_number: page.page_num,
        page_size: page.page_size,
        player_count: players.len(),
        players,
    }))
}

/// `GET /api/v2/player?id=`
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Player> {
    let id = require_id(&query)?;
    match state.players.get(id).await {
        Ok(player) => Ok(Json(player)),
        Err(RepositoryError::NoRecord) => Err(client_message(
            StatusCode::NOT_FOUND,
            "no matching record found",
        )),
        Err(e) => Err(server_error(e)),
    }
}

/// `POST /api/v2/player/update?id=` — refresh one player from the
/// upstream stats provider.
pub async fn player_update(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Player> {
    let id = require_id(&query)?;

    let player = state
        .provider
        .player_by_id(id)
        .await
        .map_err(|e| client_message(StatusCode::NOT_FOUND, e.to_string()))?;

    state
        .players
        .upsert(player.clone())
        .await
        .map_err(|e| {
            tracing::error!("failed to update player in database: {e}");
            client_message(StatusCode::NOT_FOUND, "error updating player in database")
        })?;

    Ok(Json(player))
}

/// `GET /api/v2/motd`
pub async fn get_motd(State(state): State<Arc<AppState>>) -> ApiResult<Motd> {
    let motd = state.motd.get().await.map_err(server_error)?;
    Ok(Json(motd))
}

#[derive(Debug, Deserialize)]
pub struct ClientVersion {
    #[serde(default)]
    pub version: String,
}

/// `POST /api/v2/client/connect`
pub async fn client_connect(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ClientVersion>, JsonRejection>,
) -> ApiResult<ClientConnectResponse> {
    let Json(client) = body
        .map_err(|_| client_message(StatusCode::BAD_REQUEST, "malformed data"))?;

    // An unparseable version string is a server error, like any other
    // handshake failure.
    match state.client_connect_usecase.execute(&client.version).await {
        Ok(info) => Ok(Json(ClientConnectResponse {
            motd: info.motd,
            valid_version: info.valid_version,
            update_available: info.update_available,
        })),
        Err(e) => Err(server_error(e)),
    }
}
