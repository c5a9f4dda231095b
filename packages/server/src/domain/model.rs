//! Domain models for players, games and live sessions.

use serde::{Deserialize, Serialize};

/// A player's persisted record: personal best plus lifetime totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub player_name: String,
    pub rank: i32,
    pub game_time: f64,
    pub death_type: i32,
    pub gems: i32,
    pub daggers_hit: i32,
    pub daggers_fired: i32,
    pub enemies_killed: i32,
    pub accuracy: f64,
    pub overall_time: f64,
    pub overall_deaths: i32,
    pub overall_gems: i32,
    pub overall_enemies_killed: i32,
    pub overall_daggers_hit: i32,
    pub overall_daggers_fired: i32,
    pub overall_accuracy: f64,
}

/// A completed-game record as submitted by the game client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedGame {
    pub player_id: i32,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub game_time: f64,
    #[serde(default)]
    pub death_type: i32,
    #[serde(default)]
    pub gems: i32,
    #[serde(default)]
    pub homing_daggers: i32,
    #[serde(default)]
    pub daggers_fired: i32,
    #[serde(default)]
    pub daggers_hit: i32,
    #[serde(default)]
    pub enemies_alive: i32,
    #[serde(default)]
    pub enemies_killed: i32,
    #[serde(default)]
    pub level_two_time: f64,
    #[serde(default)]
    pub level_three_time: f64,
    #[serde(default)]
    pub level_four_time: f64,
    #[serde(default)]
    pub version: String,
}

/// A submitted game that has been accepted into storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub id: i32,
    /// Unix milliseconds (UTC) when the record was accepted
    pub submitted_at: i64,
    #[serde(flatten)]
    pub game: SubmittedGame,
}

/// Most recent in-progress state for one live player.
///
/// The hub treats the telemetry fields as opaque store-and-forward
/// payload: only `player_id` is required on decode, everything else
/// defaults to its zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivePlayer {
    pub player_id: i32,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub gems: i32,
    #[serde(default)]
    pub homing_daggers: i32,
    #[serde(default)]
    pub enemies_alive: i32,
    #[serde(default)]
    pub enemies_killed: i32,
    #[serde(default)]
    pub daggers_hit: i32,
    #[serde(default)]
    pub daggers_fired: i32,
    #[serde(default = "default_death_type")]
    pub death_type: i32,
}

// -1 means the run is still in progress.
fn default_death_type() -> i32 {
    -1
}

/// Message of the day shown to connecting clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motd {
    pub message: String,
}
