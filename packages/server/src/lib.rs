//! Game-statistics tracking server.
//!
//! Clients submit completed-game records and query historical
//! leaderboards over HTTP, and broadcast live in-progress game state to
//! spectators through the WebSocket hub in [`hub`].

// layers
pub mod domain;
pub mod hub;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
