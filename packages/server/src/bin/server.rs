//! Game-statistics server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin gamepulse-server
//! cargo run --bin gamepulse-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use gamepulse_server::{
    domain::Motd,
    hub::Hub,
    infrastructure::{
        provider::HttpStatsProvider,
        repository::{InMemoryGameRepository, InMemoryMotdRepository, InMemoryPlayerRepository},
    },
    ui::{AppState, Server},
    usecase::{ClientConnectUseCase, SubmitGameUseCase},
};
use gamepulse_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "gamepulse-server")]
#[command(about = "Game-statistics server with live-session broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Base URL of the upstream stats provider
    #[arg(long, default_value = "https://stats-provider.example.com")]
    provider_url: String,

    /// Message of the day shown to connecting clients
    #[arg(long, default_value = "Welcome to gamepulse!")]
    motd: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. Stats provider
    // 3. Hub
    // 4. UseCases
    // 5. Server

    // 1. Repositories (in-memory store)
    let players = Arc::new(InMemoryPlayerRepository::new());
    let games = Arc::new(InMemoryGameRepository::new());
    let motd = Arc::new(InMemoryMotdRepository::new(Motd { message: args.motd }));

    // 2. Upstream stats provider client
    let provider = Arc::new(HttpStatsProvider::new(args.provider_url));

    // 3. Live-session broadcast hub
    let hub = Hub::spawn();

    // 4. UseCases
    let submit_game_usecase = Arc::new(SubmitGameUseCase::new(
        games.clone(),
        players.clone(),
        provider.clone(),
    ));
    let client_connect_usecase = Arc::new(ClientConnectUseCase::new(motd.clone()));

    // 5. Server
    let server = Server::new(AppState {
        hub,
        players,
        games,
        motd,
        provider,
        submit_game_usecase,
        client_connect_usecase,
    });

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
