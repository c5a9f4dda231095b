//! UseCase layer: orchestration between the UI layer and the domain
//! interfaces (repositories, stats provider).

mod client_connect;
mod error;
mod submit_game;

pub use client_connect::{ClientConnectInfo, ClientConnectUseCase};
pub use error::{ConnectError, SubmitError};
pub use submit_game::{SubmitGameUseCase, SubmitOutcome};
