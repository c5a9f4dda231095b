//! Domain layer: models, repository interfaces and domain errors.
//!
//! The concrete implementations live in the Infrastructure layer; the
//! UseCase and UI layers depend only on the traits defined here.

mod error;
mod model;
mod provider;
mod repository;

pub use error::{ProviderError, RepositoryError};
pub use model::{GameRecord, LivePlayer, Motd, Player, SubmittedGame};
pub use provider::StatsProvider;
#[cfg(test)]
pub use provider::MockStatsProvider;
pub use repository::{GameRepository, MotdRepository, PlayerRepository};
