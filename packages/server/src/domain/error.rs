//! Domain-level error types.

use thiserror::Error;

/// Errors returned by repository implementations.
#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    /// No record matched the requested identifier or range
    #[error("no matching record found")]
    NoRecord,

    /// The underlying store rejected the operation
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors returned by the third-party stats provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no player with the requested id
    #[error("player {0} not found on the stats provider")]
    PlayerNotFound(i32),

    /// Transport or decoding failure while talking to the provider
    #[error("stats provider request failed: {0}")]
    RequestFailed(String),
}
