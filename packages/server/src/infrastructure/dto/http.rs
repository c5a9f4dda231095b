//! HTTP API response DTOs.

use serde::Serialize;

use crate::domain::{GameRecord, LivePlayer, Player};

/// Generic `{"message": ...}` body, used for errors and simple acks.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response to a game submission.
#[derive(Debug, Serialize)]
pub struct SubmitGameResponse {
    pub message: String,
    pub game_id: i32,
}

/// Point-in-time copy of the live-state cache.
#[derive(Debug, Serialize)]
pub struct LivePlayersResponse {
    pub player_count: usize,
    pub players: Vec<LivePlayer>,
}

/// Paginated player listing.
#[derive(Debug, Serialize)]
pub struct PlayersPage {
    pub total_pages: usize,
    pub total_player_count: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub player_count: usize,
    pub players: Vec<Player>,
}

/// Paginated game listing.
#[derive(Debug, Serialize)]
pub struct GamesPage {
    pub total_pages: usize,
    pub total_game_count: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub game_count: usize,
    pub games: Vec<GameRecord>,
}

/// Top games by game time.
#[derive(Debug, Serialize)]
pub struct TopGamesResponse {
    pub game_count: usize,
    pub games: Vec<GameRecord>,
}

/// Client-connect handshake response.
#[derive(Debug, Serialize)]
pub struct ClientConnectResponse {
    pub motd: String,
    pub valid_version: bool,
    pub update_available: bool,
}
