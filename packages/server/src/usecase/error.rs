//! UseCase error types.

use thiserror::Error;

use crate::domain::{ProviderError, RepositoryError};

/// Failures while accepting a submitted game.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The client flags its own failed run with player id -1
    #[error("some kind of error occurred")]
    InvalidPlayerId,

    /// Player id 0 means the client never resolved its player
    #[error("player ID not found")]
    MissingPlayerId,

    /// Submissions must carry the client version
    #[error("client version not found")]
    MissingVersion,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failures while handling a client-connect handshake.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The client version is not a dotted `major.minor.patch` triple
    #[error("unparseable client version: '{0}'")]
    InvalidVersion(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
