//! UI layer: HTTP routing, request handlers and server lifecycle.

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
